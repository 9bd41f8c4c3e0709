// Copyright 2024 The Leaky Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! A minimal dense complex matrix, just capable enough for the GPT
//! decomposer: row/column slicing, Kronecker product, matrix product, and
//! trace. The decomposer never works with matrices larger than
//! `num_level^num_qubits` square (16x16 for the `d=4, n=2` case this
//! workspace bounds itself to), so a flat `Vec<Complex64>` outperforms
//! pulling in a general-purpose linear algebra crate for a handful of
//! small, fixed-shape operations.

use num_complex::Complex64;

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl ComplexMatrix {
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Complex64::new(0.0, 0.0); rows * cols],
        }
    }

    /// Builds a matrix from row-major data; `data.len()` must equal
    /// `rows * cols`.
    #[must_use]
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<Complex64>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major data length mismatch");
        Self { rows, cols, data }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.cols + col] = value;
    }

    /// Extracts the sub-matrix at the given row and column index sets, in
    /// the order given (mirrors numpy's `kraus[rows, :][:, cols]` fancy
    /// indexing used by the reference decomposer).
    #[must_use]
    pub fn slice(&self, row_indices: &[usize], col_indices: &[usize]) -> Self {
        let mut out = Self::zeros(row_indices.len(), col_indices.len());
        for (i, &r) in row_indices.iter().enumerate() {
            for (j, &c) in col_indices.iter().enumerate() {
                out.set(i, j, self.get(r, c));
            }
        }
        out
    }

    /// Kronecker (tensor) product `self ⊗ other`.
    #[must_use]
    pub fn kron(&self, other: &Self) -> Self {
        let rows = self.rows * other.rows;
        let cols = self.cols * other.cols;
        let mut out = Self::zeros(rows, cols);
        for r1 in 0..self.rows {
            for c1 in 0..self.cols {
                let a = self.get(r1, c1);
                if a == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for r2 in 0..other.rows {
                    for c2 in 0..other.cols {
                        let row = r1 * other.rows + r2;
                        let col = c1 * other.cols + c2;
                        out.set(row, col, a * other.get(r2, c2));
                    }
                }
            }
        }
        out
    }

    /// Matrix product `self @ other`.
    ///
    /// # Panics
    /// Panics if `self.cols != other.rows`.
    #[must_use]
    pub fn matmul(&self, other: &Self) -> Self {
        assert_eq!(self.cols, other.rows, "matmul dimension mismatch");
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(r, k);
                if a == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for c in 0..other.cols {
                    let acc = out.get(r, c) + a * other.get(k, c);
                    out.set(r, c, acc);
                }
            }
        }
        out
    }

    /// # Panics
    /// Panics if the matrix isn't square.
    #[must_use]
    pub fn trace(&self) -> Complex64 {
        assert_eq!(self.rows, self.cols, "trace of a non-square matrix");
        (0..self.rows).map(|i| self.get(i, i)).sum()
    }

    #[must_use]
    pub fn sum_abs_squared(&self) -> f64 {
        self.data.iter().map(Complex64::norm_sqr).sum()
    }

    /// Kronecker product of a slice of matrices, folded left to right.
    ///
    /// # Panics
    /// Panics if `mats` is empty.
    #[must_use]
    pub fn kron_all(mats: &[&Self]) -> Self {
        let mut iter = mats.iter();
        let first = (*iter.next().expect("kron_all needs at least one matrix")).clone();
        iter.fold(first, |acc, m| acc.kron(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn kron_of_identities_is_identity() {
        let i2 = ComplexMatrix::from_row_major(2, 2, vec![c(1.0), c(0.0), c(0.0), c(1.0)]);
        let i4 = i2.kron(&i2);
        assert_eq!(i4.rows(), 4);
        for r in 0..4 {
            for cidx in 0..4 {
                let expected = if r == cidx { c(1.0) } else { c(0.0) };
                assert_eq!(i4.get(r, cidx), expected);
            }
        }
    }

    #[test]
    fn slice_extracts_requested_block() {
        let m = ComplexMatrix::from_row_major(
            3,
            3,
            (0..9).map(|v| c(f64::from(v))).collect(),
        );
        let block = m.slice(&[0, 2], &[1]);
        assert_eq!(block.get(0, 0), c(1.0));
        assert_eq!(block.get(1, 0), c(7.0));
    }

    #[test]
    fn trace_sums_the_diagonal() {
        let m = ComplexMatrix::from_row_major(2, 2, vec![c(1.0), c(2.0), c(3.0), c(4.0)]);
        assert_eq!(m.trace(), c(5.0));
    }
}
