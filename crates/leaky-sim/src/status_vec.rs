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

use crate::leakage_status::LeakageStatus;
use crate::transition::Transition;

/// Mutable per-qubit leakage label vector, `0` meaning computational.
/// Owned by a [`crate::simulator::Simulator`] for the lifetime of a shot.
#[derive(Debug, Clone)]
pub struct StatusVec {
    labels: Vec<u8>,
}

impl StatusVec {
    #[must_use]
    pub fn new(num_qubits: usize) -> Self {
        Self {
            labels: vec![0; num_qubits],
        }
    }

    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn label(&self, qubit: usize) -> u8 {
        self.labels[qubit]
    }

    /// The leakage status of a group of qubits, in the order given.
    #[must_use]
    pub fn status(&self, targets: &[usize]) -> LeakageStatus {
        let levels: Vec<u8> = targets.iter().map(|&t| self.labels[t]).collect();
        LeakageStatus::new(&levels)
    }

    /// Sets every qubit in `targets` to the same `level` (used by
    /// [`StatusVec::reset`]).
    pub fn set(&mut self, targets: &[usize], level: u8) {
        for &t in targets {
            self.labels[t] = level;
        }
    }

    /// Applies a sampled [`Transition`]'s `final_status` onto `targets`.
    pub fn apply_transition(&mut self, targets: &[usize], transition: &Transition) {
        for (&t, &level) in targets.iter().zip(transition.final_status.as_slice()) {
            self.labels[t] = level;
        }
    }

    pub fn reset(&mut self, targets: &[usize]) {
        self.set(targets, 0);
    }

    pub fn clear(&mut self) {
        self.labels.iter_mut().for_each(|l| *l = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_computational() {
        let vec = StatusVec::new(3);
        assert_eq!(vec.status(&[0, 1, 2]).as_slice(), [0, 0, 0]);
    }

    #[test]
    fn apply_transition_updates_only_the_targets() {
        let mut vec = StatusVec::new(2);
        let transition = Transition::new(
            LeakageStatus::new(&[0]),
            LeakageStatus::new(&[1]),
            1.0,
            None,
        );
        vec.apply_transition(&[0], &transition);
        assert_eq!(vec.label(0), 1);
        assert_eq!(vec.label(1), 0);
    }

    #[test]
    fn reset_clears_targets_to_zero() {
        let mut vec = StatusVec::new(1);
        vec.set(&[0], 2);
        vec.reset(&[0]);
        assert_eq!(vec.label(0), 0);
    }
}
