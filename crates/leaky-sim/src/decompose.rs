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

//! The Generalized Pauli Twirling (GPT) decomposer: turns a set of Kraus
//! operators into a [`TransitionTable`] over the R/U/D/L leakage-status
//! partition.

use leaky_core::Pauli;
use num_complex::Complex64;

use crate::error::LeakyError;
use crate::leakage_status::LeakageStatus;
use crate::matrix::ComplexMatrix;
use crate::transition::Transition;
use crate::transition_table::TransitionTable;

const DROP_THRESHOLD: f64 = 1e-9;

/// An insertion-ordered accumulator over the tiny `(initial, final,
/// pauli_index)` key space produced by the decomposer, so the resulting
/// [`TransitionTable`] rows come out in the exact Kraus -> status-pair ->
/// projector-combination -> Pauli order the accumulation itself follows,
/// the same way on every run. A `HashMap` would accumulate in that order
/// too, but its iteration order on drain is randomized per process; the key
/// space here is small enough (bounded by `num_level.pow(num_qubits)`) that
/// linear lookup costs nothing worth trading determinism for.
#[derive(Default)]
struct OrderedAccumulator {
    entries: Vec<((LeakageStatus, LeakageStatus, Option<u32>), f64)>,
}

impl OrderedAccumulator {
    fn add(&mut self, key: (LeakageStatus, LeakageStatus, Option<u32>), probability: f64) {
        if let Some((_, total)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *total += probability;
        } else {
            self.entries.push((key, probability));
        }
    }
}

/// Recursive Kronecker-expansion index set for a subspace projection.
///
/// `project_status[i]` lists the basis indices qubit `i` ranges over in this
/// block: `[0, 1]` for the full computational subspace, or a single-element
/// list for a fixed leakage level. Matches the `(d, project_status) -> slice`
/// table exactly.
#[must_use]
pub fn projector_slice(num_level: usize, project_status: &[Vec<u8>]) -> Vec<usize> {
    let num_qubits = project_status.len();
    let status = &project_status[0];
    if num_qubits == 1 {
        return status.iter().map(|&s| s as usize).collect();
    }
    let tail = projector_slice(num_level, &project_status[1..]);
    let stride = num_level.pow((num_qubits - 1) as u32);
    status
        .iter()
        .flat_map(|&s| tail.iter().map(move |&x| x + s as usize * stride))
        .collect()
}

/// Expands a leakage status into its projector-space form: `(0, 1)` at a
/// computational qubit, `(s + 1,)` at a leaked one.
fn to_projector_spaces(status: &[u8]) -> Vec<Vec<u8>> {
    status
        .iter()
        .map(|&s| if s == 0 { vec![0, 1] } else { vec![s + 1] })
        .collect()
}

/// Cartesian product over a list of per-position option lists, leftmost
/// position slowest-varying (matches `itertools.product`'s iteration order,
/// which fixes the summation order for deterministic output).
fn cartesian_product<T: Clone>(options: &[Vec<T>]) -> Vec<Vec<T>> {
    options.iter().fold(vec![Vec::new()], |acc, opts| {
        acc.into_iter()
            .flat_map(|prefix| {
                opts.iter().map(move |o| {
                    let mut next = prefix.clone();
                    next.push(o.clone());
                    next
                })
            })
            .collect()
    })
}

/// Replaces the computational (`[0, 1]`) branch at `scatter_indices` with two
/// separate single-value branches, then takes the Cartesian product: the
/// "scatter step" that accounts for the arbitrary
/// pre-transition (for U) or post-transition (for D) computational-basis
/// amplitude.
fn scatter_combinations(
    projector_spaces: &[Vec<u8>],
    scatter_indices: &[usize],
) -> Vec<Vec<Vec<u8>>> {
    let per_qubit_options: Vec<Vec<Vec<u8>>> = projector_spaces
        .iter()
        .enumerate()
        .map(|(i, space)| {
            if scatter_indices.contains(&i) {
                vec![vec![0u8], vec![1u8]]
            } else {
                vec![space.clone()]
            }
        })
        .collect();
    cartesian_product(&per_qubit_options)
}

/// All (initial_projector, final_projector) combinations for one
/// (initial_status, final_status) pair, scattering over U-indices on the
/// initial side and D-indices on the final side.
fn scatter_status(initial: &[u8], r#final: &[u8]) -> Vec<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
    let initial_spaces = to_projector_spaces(initial);
    let final_spaces = to_projector_spaces(r#final);

    let up_indices: Vec<usize> = (0..initial.len())
        .filter(|&i| initial[i] == 0 && r#final[i] > 0)
        .collect();
    let down_indices: Vec<usize> = (0..initial.len())
        .filter(|&i| initial[i] > 0 && r#final[i] == 0)
        .collect();

    let initial_combos = scatter_combinations(&initial_spaces, &up_indices);
    let final_combos = scatter_combinations(&final_spaces, &down_indices);

    let mut out = Vec::with_capacity(initial_combos.len() * final_combos.len());
    for i in &initial_combos {
        for f in &final_combos {
            out.push((i.clone(), f.clone()));
        }
    }
    out
}

fn project_kraus(
    kraus: &ComplexMatrix,
    num_level: usize,
    initial_projector: &[Vec<u8>],
    final_projector: &[Vec<u8>],
) -> ComplexMatrix {
    let initial_slice = projector_slice(num_level, initial_projector);
    let final_slice = projector_slice(num_level, final_projector);
    kraus.slice(&final_slice, &initial_slice)
}

fn pauli_tensor(paulis: &[Pauli]) -> ComplexMatrix {
    let mats: Vec<ComplexMatrix> = paulis
        .iter()
        .map(|p| {
            let m = p.matrix();
            ComplexMatrix::from_row_major(2, 2, vec![m[0][0], m[0][1], m[1][0], m[1][1]])
        })
        .collect();
    let refs: Vec<&ComplexMatrix> = mats.iter().collect();
    ComplexMatrix::kron_all(&refs)
}

fn validate_status(status: &[u8], num_level: u8) -> Result<(), LeakyError> {
    if status.iter().any(|&s| s > num_level - 2) {
        return Err(LeakyError::OutOfRangeStatus {
            status: LeakageStatus::new(status),
            num_level,
        });
    }
    Ok(())
}

/// Decomposes a set of Kraus operators `{K_m}` acting on `num_qubits` qudits
/// of `num_level` levels each into a [`TransitionTable`] via Generalized
/// Pauli Twirling.
///
/// `kraus_operators` must each be `num_level.pow(num_qubits)` square;
/// violating that is [`LeakyError::InvalidShape`].
pub fn decompose_kraus_operators(
    kraus_operators: &[ComplexMatrix],
    num_qubits: usize,
    num_level: u8,
) -> Result<TransitionTable, LeakyError> {
    let side = (num_level as usize).pow(num_qubits as u32);
    for kraus in kraus_operators {
        if kraus.rows() != side || kraus.cols() != side {
            return Err(LeakyError::InvalidShape {
                expected_side: side,
                actual_rows: kraus.rows(),
                actual_cols: kraus.cols(),
            });
        }
    }

    let level_range: Vec<u8> = (0..num_level - 1).collect();
    let all_status = cartesian_product(&vec![level_range; num_qubits]);
    for status in &all_status {
        validate_status(status, num_level)?;
    }

    let mut accumulated = OrderedAccumulator::default();

    for kraus in kraus_operators {
        for initial_status in &all_status {
            for final_status in &all_status {
                let num_u = initial_status
                    .iter()
                    .zip(final_status)
                    .filter(|(&s0, &s1)| s0 == 0 && s1 > 0)
                    .count();
                let r_qubits: Vec<usize> = initial_status
                    .iter()
                    .zip(final_status)
                    .enumerate()
                    .filter(|(_, (&s0, &s1))| s0 == 0 && s1 == 0)
                    .map(|(i, _)| i)
                    .collect();
                let num_r = r_qubits.len();
                let prefactor = 1.0 / 2f64.powi(num_u as i32);

                let key_initial = LeakageStatus::new(initial_status);
                let key_final = LeakageStatus::new(final_status);

                for (initial_proj, final_proj) in scatter_status(initial_status, final_status) {
                    let block = project_kraus(kraus, num_level as usize, &initial_proj, &final_proj);

                    if num_r == 0 {
                        debug_assert_eq!((block.rows(), block.cols()), (1, 1));
                        let probability = prefactor * block.get(0, 0).norm_sqr();
                        accumulated.add((key_initial, key_final, None), probability);
                    } else {
                        let dim = 1usize << num_r;
                        debug_assert_eq!((block.rows(), block.cols()), (dim, dim));
                        for pauli_index in 0..4u32.pow(num_r as u32) {
                            let paulis = Transition::decode_pauli_string(pauli_index, num_r);
                            let tensor = pauli_tensor(&paulis);
                            let amplitude = block.matmul(&tensor).trace() / Complex64::new(dim as f64, 0.0);
                            let probability = prefactor * amplitude.norm_sqr();
                            accumulated.add((key_initial, key_final, Some(pauli_index)), probability);
                        }
                    }
                }
            }
        }
    }

    let mut table = TransitionTable::new();
    for ((initial, r#final, pauli_index), probability) in accumulated.entries {
        if probability < DROP_THRESHOLD {
            continue;
        }
        table.push(Transition::new(initial, r#final, probability, pauli_index));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_6;

    fn identity(side: usize) -> ComplexMatrix {
        let mut data = vec![Complex64::new(0.0, 0.0); side * side];
        for i in 0..side {
            data[i * side + i] = Complex64::new(1.0, 0.0);
        }
        ComplexMatrix::from_row_major(side, side, data)
    }

    fn status(levels: &[u8]) -> LeakageStatus {
        LeakageStatus::new(levels)
    }

    #[test]
    fn projector_slice_matches_spec_table() {
        assert_eq!(projector_slice(2, &[vec![0]]), [0]);
        assert_eq!(projector_slice(2, &[vec![0, 1]]), [0, 1]);
        assert_eq!(projector_slice(3, &[vec![2]]), [2]);
        assert_eq!(projector_slice(3, &[vec![0, 1], vec![2]]), [2, 5]);
        assert_eq!(projector_slice(3, &[vec![2], vec![2]]), [8]);
        assert_eq!(
            projector_slice(4, &[vec![0, 1], vec![0, 1]]),
            [0, 1, 4, 5]
        );
        assert_eq!(projector_slice(4, &[vec![0, 1], vec![2]]), [2, 6]);
    }

    #[test]
    fn identity_channel_is_a_single_noop_transition() {
        let table = decompose_kraus_operators(&[identity(2)], 1, 2).unwrap();
        let row = table.row(status(&[0]));
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].final_status, status(&[0]));
        assert_eq!(row[0].pauli_index, Some(0));
        assert!((row[0].probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_qubit_depolarizing_round_trips_to_uniform_pauli_probabilities() {
        let p = [0.4, 0.2, 0.2, 0.2];
        let krauses: Vec<ComplexMatrix> = Pauli::ALL
            .iter()
            .zip(p)
            .map(|(pauli, weight)| {
                let m = pauli.matrix();
                let sqrt_w = Complex64::new(weight.sqrt(), 0.0);
                ComplexMatrix::from_row_major(
                    2,
                    2,
                    vec![
                        sqrt_w * m[0][0],
                        sqrt_w * m[0][1],
                        sqrt_w * m[1][0],
                        sqrt_w * m[1][1],
                    ],
                )
            })
            .collect();
        let table = decompose_kraus_operators(&krauses, 1, 2).unwrap();
        for (i, expected) in p.iter().enumerate() {
            let got = table.probability(status(&[0]), status(&[0]), Some(i as u32));
            assert!(
                (got - expected).abs() < 1e-6,
                "pauli {i}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn rejects_wrong_shaped_kraus_operator() {
        let bad = ComplexMatrix::zeros(3, 3);
        let err = decompose_kraus_operators(&[bad], 1, 2).unwrap_err();
        assert!(matches!(err, LeakyError::InvalidShape { .. }));
    }

    #[test]
    fn four_level_partial_leakage_unitary_matches_expected_probabilities() {
        let theta = FRAC_PI_6;
        let (cos, sin) = (theta.cos(), theta.sin());
        let mut data = vec![Complex64::new(0.0, 0.0); 16];
        data[0] = Complex64::new(1.0, 0.0);
        data[1 * 4 + 1] = Complex64::new(cos, 0.0);
        data[1 * 4 + 2] = Complex64::new(-sin, 0.0);
        data[2 * 4 + 1] = Complex64::new(sin, 0.0);
        data[2 * 4 + 2] = Complex64::new(cos, 0.0);
        data[3 * 4 + 3] = Complex64::new(1.0, 0.0);
        let unitary = ComplexMatrix::from_row_major(4, 4, data);

        let table = decompose_kraus_operators(&[unitary], 1, 4).unwrap();

        let half_theta = theta / 2.0;
        let p_ii = half_theta.cos().powi(4);
        let p_iz = half_theta.sin().powi(4);
        assert!(
            (table.probability(status(&[0]), status(&[0]), Some(0)) - p_ii).abs() < 1e-9
        );
        assert!(
            (table.probability(status(&[0]), status(&[0]), Some(3)) - p_iz).abs() < 1e-9
        );
        assert!(
            (table.probability(status(&[0]), status(&[1]), None) - sin.powi(2) / 2.0).abs()
                < 1e-9
        );
        assert!(
            (table.probability(status(&[1]), status(&[0]), None) - sin.powi(2)).abs() < 1e-9
        );
        assert!(
            (table.probability(status(&[1]), status(&[1]), None) - theta.cos().powi(2)).abs()
                < 1e-9
        );
        assert!((table.probability(status(&[2]), status(&[2]), None) - 1.0).abs() < 1e-9);
    }
}
