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

use std::fmt;

use crate::leakage_status::LeakageStatus;

/// Errors raised by the decomposer, the transition tables, and the
/// simulator's gate dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum LeakyError {
    /// A Kraus operator's side length wasn't `num_level.pow(num_qubits)`.
    InvalidShape {
        expected_side: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
    /// A status component exceeded `num_level - 2`.
    OutOfRangeStatus { status: LeakageStatus, num_level: u8 },
    /// `TransitionTable::validate` found a row that doesn't sum to 1, or a
    /// twirl with a non-identity factor on a non-R qubit.
    MalformedChannel(String),
    /// A gate name in the measurement/reset/basis blacklist.
    UnsupportedBasis { gate_name: String },
    /// `Simulator::do_circuit` was handed a circuit with a different qubit
    /// count than the simulator was constructed with.
    QubitCountMismatch { expected: usize, actual: usize },
    /// `Sampler::sample_detectors` was called with `ReadoutStrategy::RawLabel`.
    InvalidStrategy(String),
    /// An R-target transition was sampled without a `pauli_index`; this
    /// indicates a `TransitionTable` built outside of `validate`'s guarantees.
    InternalConsistency(String),
}

impl fmt::Display for LeakyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape {
                expected_side,
                actual_rows,
                actual_cols,
            } => write!(
                f,
                "expected a {expected_side}x{expected_side} Kraus operator, got {actual_rows}x{actual_cols}"
            ),
            Self::OutOfRangeStatus { status, num_level } => write!(
                f,
                "leakage status {status:?} has a component >= num_level - 1 ({})",
                num_level - 1
            ),
            Self::MalformedChannel(msg) => write!(f, "malformed transition channel: {msg}"),
            Self::UnsupportedBasis { gate_name } => write!(
                f,
                "only Z-basis measurement and reset are supported, not {gate_name}"
            ),
            Self::QubitCountMismatch { expected, actual } => write!(
                f,
                "expected {expected} qubits, but the circuit has {actual}"
            ),
            Self::InvalidStrategy(msg) => write!(f, "invalid readout strategy: {msg}"),
            Self::InternalConsistency(msg) => write!(f, "internal consistency error: {msg}"),
        }
    }
}

impl std::error::Error for LeakyError {}
