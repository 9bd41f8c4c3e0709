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

//! The parallel shot driver: runs N independent single-shot
//! [`crate::simulator::Simulator`]s against a reference circuit, in order,
//! regardless of which worker finishes first.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use crate::circuit::{Circuit, MeasurementToDetectorConverter};
use crate::error::LeakyError;
use crate::readout::ReadoutStrategy;
use crate::simulator::Simulator;
use crate::transition_collection::TransitionCollection;

/// Runs many independent shots of a reference circuit and reports raw
/// measurements, or detector/observable arrays via an external converter.
///
/// `circuit` and `transitions` are treated as immutable once a `Sampler` is
/// built and shared across worker threads through an `Arc`, the same
/// ownership shape a parallel shot-runner's shared per-shot state uses for
/// its rayon fan-out.
pub struct Sampler {
    circuit: Arc<Circuit>,
    transitions: Arc<TransitionCollection>,
    single_qubit_transition_controls: HashMap<usize, i64>,
    two_qubit_transition_controls: HashMap<(usize, usize), i64>,
    seed: Option<u64>,
}

impl Sampler {
    #[must_use]
    pub fn new(circuit: Circuit, transitions: Option<TransitionCollection>, seed: Option<u64>) -> Self {
        Self {
            circuit: Arc::new(circuit),
            transitions: Arc::new(transitions.unwrap_or_default()),
            single_qubit_transition_controls: HashMap::new(),
            two_qubit_transition_controls: HashMap::new(),
            seed,
        }
    }

    #[must_use]
    pub fn with_controls(
        mut self,
        single_qubit_transition_controls: HashMap<usize, i64>,
        two_qubit_transition_controls: HashMap<(usize, usize), i64>,
    ) -> Self {
        self.single_qubit_transition_controls = single_qubit_transition_controls;
        self.two_qubit_transition_controls = two_qubit_transition_controls;
        self
    }

    #[must_use]
    pub fn num_measurements(&self) -> usize {
        self.circuit.num_measurements()
    }

    /// Derives shot `shot_index`'s seed from the sampler's own seed: `s *
    /// (shot_index + 1)` when `s` is given, for reproducibility; `None`
    /// otherwise, so each shot draws from OS
    /// entropy.
    fn shot_seed(&self, shot_index: usize) -> Option<u64> {
        self.seed
            .map(|s| s.wrapping_mul(shot_index as u64 + 1))
    }

    fn run_shot(&self, shot_index: usize, strategy: ReadoutStrategy) -> Result<Vec<i64>, LeakyError> {
        let mut simulator = match self.shot_seed(shot_index) {
            Some(seed) => Simulator::with_seed(self.circuit.num_qubits, self.transitions.clone(), seed),
            None => Simulator::new(self.circuit.num_qubits, self.transitions.clone()),
        };
        simulator.set_single_qubit_transition_controls(self.single_qubit_transition_controls.clone());
        simulator.set_two_qubit_transition_controls(self.two_qubit_transition_controls.clone());
        simulator.do_circuit(&self.circuit, None)?;
        Ok(simulator.current_measurement_record(strategy))
    }

    /// Runs `shots` independent shots, returning a `shots x num_measurements`
    /// array in shot order regardless of which worker finished first.
    /// `num_workers` bounds the rayon thread pool built for this call
    /// (mirroring a CLI's per-run `--workers` flag); `0` is treated as
    /// `1`.
    pub fn sample(
        &self,
        shots: usize,
        strategy: ReadoutStrategy,
        num_workers: usize,
    ) -> Result<Vec<Vec<i64>>, LeakyError> {
        info!("sampling {shots} shots across {} worker(s)", num_workers.max(1));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers.max(1))
            .build()
            .map_err(|e| LeakyError::InternalConsistency(e.to_string()))?;
        pool.install(|| {
            (0..shots)
                .into_par_iter()
                .map(|shot_index| self.run_shot(shot_index, strategy))
                .collect()
        })
    }

    /// Runs `shots` shots and converts the resulting Boolean record through
    /// `converter` into `(detectors, observables)`. Requires a Boolean
    /// readout strategy; [`ReadoutStrategy::RawLabel`] fails
    /// with [`LeakyError::InvalidStrategy`] since its labels aren't binary.
    pub fn sample_detectors(
        &self,
        shots: usize,
        strategy: ReadoutStrategy,
        num_workers: usize,
        converter: &dyn MeasurementToDetectorConverter,
    ) -> Result<(Vec<Vec<bool>>, Vec<Vec<bool>>), LeakyError> {
        if !strategy.is_boolean() {
            return Err(LeakyError::InvalidStrategy(
                "sample_detectors requires a Boolean readout strategy, not RawLabel".to_string(),
            ));
        }
        let raw = self.sample(shots, strategy, num_workers)?;
        let bits: Vec<Vec<bool>> = raw
            .into_iter()
            .map(|row| row.into_iter().map(|v| v != 0).collect())
            .collect();
        Ok(converter.convert(&bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, CircuitInstruction, ParityCheckConverter};

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::new(2);
        circuit
            .push(CircuitInstruction::gate("H", vec![0]))
            .push(CircuitInstruction::gate("CX", vec![0, 1]))
            .push(CircuitInstruction::gate("M", vec![0, 1]));
        circuit
    }

    #[test]
    fn sample_shape_matches_shots_and_measurements() {
        let _ = env_logger::try_init();
        let sampler = Sampler::new(bell_circuit(), None, Some(1));
        let result = sampler.sample(5, ReadoutStrategy::RawLabel, 2).unwrap();
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|row| row.len() == sampler.num_measurements()));
    }

    #[test]
    fn same_seed_is_deterministic_across_worker_counts() {
        let sampler = Sampler::new(bell_circuit(), None, Some(99));
        let single = sampler.sample(16, ReadoutStrategy::RawLabel, 1).unwrap();
        let multi = sampler.sample(16, ReadoutStrategy::RawLabel, 4).unwrap();
        assert_eq!(single, multi);
    }

    #[test]
    fn bell_pairs_are_always_correlated() {
        let sampler = Sampler::new(bell_circuit(), None, Some(3));
        let result = sampler.sample(32, ReadoutStrategy::RawLabel, 2).unwrap();
        for row in result {
            assert_eq!(row[0], row[1]);
        }
    }

    #[test]
    fn sample_detectors_rejects_raw_label() {
        let sampler = Sampler::new(bell_circuit(), None, Some(1));
        let converter = ParityCheckConverter::new(vec![vec![0, 1]], vec![]);
        let err = sampler
            .sample_detectors(4, ReadoutStrategy::RawLabel, 1, &converter)
            .unwrap_err();
        assert!(matches!(err, LeakyError::InvalidStrategy(_)));
    }

    #[test]
    fn noiseless_bell_circuit_has_all_zero_detectors() {
        let sampler = Sampler::new(bell_circuit(), None, Some(5));
        let converter = ParityCheckConverter::new(vec![vec![0, 1]], vec![vec![0]]);
        let (detectors, _observables) = sampler
            .sample_detectors(8, ReadoutStrategy::DeterministicLeakageProjection, 2, &converter)
            .unwrap();
        assert!(detectors.iter().all(|row| row.iter().all(|&b| !b)));
    }
}
