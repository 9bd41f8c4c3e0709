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

use leaky_core::Pauli;

use crate::leakage_status::{LeakageStatus, TransitionType};

/// One row of a [`crate::transition_table::TransitionTable`]: a sampled
/// outcome of a gate's noise channel, conditioned on the group's leakage
/// status before the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub initial_status: LeakageStatus,
    pub final_status: LeakageStatus,
    pub probability: f64,
    /// Present iff at least one qubit in the group is of [`TransitionType::Remain`];
    /// see [`Transition::decode_pauli_string`] for how it's interpreted.
    pub pauli_index: Option<u32>,
}

impl Transition {
    #[must_use]
    pub fn new(
        initial_status: LeakageStatus,
        final_status: LeakageStatus,
        probability: f64,
        pauli_index: Option<u32>,
    ) -> Self {
        Self {
            initial_status,
            final_status,
            probability,
            pauli_index,
        }
    }

    /// Per-qubit [`TransitionType`] classification, one entry per qubit in
    /// the group, in target order.
    #[must_use]
    pub fn transition_types(&self) -> Vec<TransitionType> {
        self.initial_status
            .as_slice()
            .iter()
            .zip(self.final_status.as_slice())
            .map(|(&i, &f)| TransitionType::classify(i, f))
            .collect()
    }

    /// Decodes `pauli_index` into one [`Pauli`] per R-qubit, MSB-first
    /// base-4 digits over the alphabet `I,X,Y,Z`; `num_r` is
    /// the number of R-qubits in the group (the digit count of the index).
    #[must_use]
    pub fn decode_pauli_string(pauli_index: u32, num_r: usize) -> Vec<Pauli> {
        (0..num_r)
            .map(|p| {
                let shift = 2 * (num_r - 1 - p);
                let digit = ((pauli_index >> shift) & 0b11) as u8;
                Pauli::from_digit(digit)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_qubit_z_at_index_three() {
        // E3 of the simulator scenarios pins pauli_index=3 to a lone Z.
        assert_eq!(Transition::decode_pauli_string(3, 1), [Pauli::Z]);
    }

    #[test]
    fn decodes_two_qubit_ix_at_index_one() {
        // E4 pins idx=1 to "IX" (q0=I, q1=X), MSB-first.
        assert_eq!(
            Transition::decode_pauli_string(1, 2),
            [Pauli::I, Pauli::X]
        );
    }

    #[test]
    fn transition_types_track_each_qubit() {
        let t = Transition::new(
            LeakageStatus::new(&[0, 1]),
            LeakageStatus::new(&[0, 0]),
            1.0,
            None,
        );
        assert_eq!(
            t.transition_types(),
            [TransitionType::Remain, TransitionType::Down]
        );
    }
}
