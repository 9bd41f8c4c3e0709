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

//! A "Pauli+ with leakage" Monte Carlo simulator for Clifford circuits.
//!
//! A [`decompose::decompose_kraus_operators`] turns a gate's Kraus
//! operators into a [`transition_table::TransitionTable`] via Generalized
//! Pauli Twirling; [`simulator::Simulator`] replays a circuit against an
//! external stabilizer engine (`leaky-qsim`), sampling those tables to track
//! leakage alongside the Clifford tableau; [`sampler::Sampler`] runs many
//! shots of a reference circuit in parallel.

pub mod circuit;
pub mod decompose;
pub mod error;
pub mod leakage_status;
pub mod matrix;
pub mod readout;
pub mod sampler;
pub mod simulator;
pub mod status_vec;
pub mod transition;
pub mod transition_collection;
pub mod transition_table;

pub use circuit::{Circuit, CircuitInstruction, MeasurementToDetectorConverter, ParityCheckConverter};
pub use decompose::decompose_kraus_operators;
pub use error::LeakyError;
pub use leakage_status::{LeakageStatus, TransitionType};
pub use matrix::ComplexMatrix;
pub use readout::ReadoutStrategy;
pub use sampler::Sampler;
pub use simulator::Simulator;
pub use status_vec::StatusVec;
pub use transition::Transition;
pub use transition_collection::{Guard, TransitionCollection};
pub use transition_table::TransitionTable;
