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

/// Base trait for quantum simulators.
///
/// Mirrors the minimal contract every stabilizer/state backend in this
/// workspace must provide: report its qubit count and return to the
/// all-zero computational state.
pub trait QuantumSimulator {
    /// Number of qubits this simulator instance was constructed with.
    fn num_qubits(&self) -> usize;

    /// Resets the simulator to `|0...0>`, clearing all correlations.
    fn reset(&mut self) -> &mut Self;
}
