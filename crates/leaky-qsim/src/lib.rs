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

//! A minimal stabilizer-circuit engine: the external collaborator that
//! `leaky_sim::Simulator` drives through [`CliffordGateable`] and
//! [`QuantumSimulator`]. Qubits are tracked over the computational subspace
//! only; leakage bookkeeping lives one layer up, in `leaky-sim`.

pub mod clifford_gateable;
pub mod error;
pub mod quantum_simulator;
pub mod stabilizer_engine;
pub mod tableau;

pub use clifford_gateable::{CliffordGateable, MeasurementResult};
pub use error::TableauError;
pub use quantum_simulator::QuantumSimulator;
pub use stabilizer_engine::StabilizerEngine;
pub use tableau::StabTableau;
