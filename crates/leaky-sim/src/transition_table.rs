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

use std::collections::HashMap;

use rand::Rng;

use crate::error::LeakyError;
use crate::leakage_status::LeakageStatus;
use crate::transition::Transition;

const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// A gate's noise channel, as rows of possible (initial -> final, optional
/// Pauli twirl) outcomes grouped by initial status. Built once by the GPT
/// decomposer, then read-only and safe to share across shots.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rows: HashMap<LeakageStatus, Vec<Transition>>,
}

impl TransitionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: HashMap<LeakageStatus, Vec<Transition>>) -> Self {
        Self { rows }
    }

    /// Appends a transition to its initial status's row. Used by the
    /// decomposer during accumulation and by tests constructing tables by
    /// hand.
    pub fn push(&mut self, transition: Transition) {
        self.rows
            .entry(transition.initial_status)
            .or_default()
            .push(transition);
    }

    #[must_use]
    pub fn row(&self, initial: LeakageStatus) -> &[Transition] {
        self.rows.get(&initial).map_or(&[], Vec::as_slice)
    }

    /// `probability(initial, final, pauli_index)`: linear search of the row;
    /// `0.0` for a status/final/pauli_index combination with no matching row.
    #[must_use]
    pub fn probability(
        &self,
        initial: LeakageStatus,
        r#final: LeakageStatus,
        pauli_index: Option<u32>,
    ) -> f64 {
        self.row(initial)
            .iter()
            .find(|t| t.final_status == r#final && t.pauli_index == pauli_index)
            .map_or(0.0, |t| t.probability)
    }

    /// Categorically samples a transition from `initial`'s row, renormalizing
    /// first if the row's probabilities don't sum exactly to 1 due to
    /// floating-point rounding.
    ///
    /// # Panics
    /// Panics if `initial` has no registered row; callers only sample a
    /// table after confirming one exists for the current gate and status.
    pub fn sample(&self, initial: LeakageStatus, rng: &mut impl Rng) -> Transition {
        let row = self.row(initial);
        assert!(
            !row.is_empty(),
            "sample called on a table with no row for status {initial}"
        );
        let total: f64 = row.iter().map(|t| t.probability).sum();
        let mut draw = rng.random::<f64>() * total;
        for transition in row {
            draw -= transition.probability;
            if draw <= 0.0 {
                return *transition;
            }
        }
        row[row.len() - 1]
    }

    /// Verifies every row sums to `1 +/- 1e-6` and that the twirl attached to
    /// any transition carries identity on qubits whose type isn't
    /// [`crate::leakage_status::TransitionType::Remain`].
    pub fn validate(&self) -> Result<(), LeakyError> {
        for (status, row) in &self.rows {
            let sum: f64 = row.iter().map(|t| t.probability).sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(LeakyError::MalformedChannel(format!(
                    "row for status {status} sums to {sum}, expected 1"
                )));
            }
            for transition in row {
                let num_r = transition
                    .transition_types()
                    .iter()
                    .filter(|t| **t == crate::leakage_status::TransitionType::Remain)
                    .count();
                if num_r == 0 && transition.pauli_index.is_some() {
                    return Err(LeakyError::MalformedChannel(format!(
                        "transition {status} -> {} carries a twirl but has no R qubits",
                        transition.final_status
                    )));
                }
            }
        }
        Ok(())
    }
}
