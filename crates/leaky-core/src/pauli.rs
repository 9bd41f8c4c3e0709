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

use num_complex::Complex64;

/// A single-qubit Pauli operator, ordered `I, X, Y, Z` to match the
/// base-4 `pauli_index` encoding used throughout the leaky-pauli-channel
/// representation (see `leaky_sim::transition` for the decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Pauli {
    I = 0,
    X = 1,
    Y = 2,
    Z = 3,
}

impl Pauli {
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Index in `[0, 4)` matching this Pauli's position in `ALL`.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Pauli::index`]; `digit` must be in `[0, 4)`.
    #[must_use]
    pub fn from_digit(digit: u8) -> Self {
        match digit {
            0 => Pauli::I,
            1 => Pauli::X,
            2 => Pauli::Y,
            _ => Pauli::Z,
        }
    }

    /// Gate name understood by a Clifford-gate stabilizer engine.
    #[must_use]
    pub fn gate_name(self) -> &'static str {
        match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }

    /// The 2x2 matrix representation, in the same basis order `{|0>, |1>}`
    /// used by [`Pauli::matrix`]'s callers in the GPT decomposer.
    #[must_use]
    pub fn matrix(self) -> [[Complex64; 2]; 2] {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            Pauli::I => [[one, zero], [zero, one]],
            Pauli::X => [[zero, one], [one, zero]],
            Pauli::Y => [[zero, -i], [i, zero]],
            Pauli::Z => [[one, zero], [zero, -one]],
        }
    }
}
