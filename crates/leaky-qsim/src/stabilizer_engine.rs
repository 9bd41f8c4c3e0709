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

use crate::clifford_gateable::CliffordGateable;
use crate::quantum_simulator::QuantumSimulator;

/// The full external-stabilizer-engine contract `leaky_sim::Simulator` is
/// written against: Clifford gate application plus the calibrated-error and
/// measurement-record primitives a leakage-aware simulator needs on top.
///
/// Qubit count and seed are construction-time concerns for this workspace's
/// engines (a fresh [`crate::tableau::StabTableau`] is built per shot), so
/// unlike the narrower `set_num_qubits`/`seed` mutators of an engine meant to
/// be reused across differently-sized circuits, this trait only adds the two
/// methods a freshly constructed engine doesn't already get from
/// [`CliffordGateable`]/[`QuantumSimulator`].
pub trait StabilizerEngine: CliffordGateable + QuantumSimulator {
    /// Applies a Pauli X with probability `p`. Returns whether it fired.
    fn x_error(&mut self, target: usize, p: f64) -> bool;

    /// The Boolean measurement record accumulated so far, oldest first.
    fn current_measurement_record(&self) -> &[bool];
}
