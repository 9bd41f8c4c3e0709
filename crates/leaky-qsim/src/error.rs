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

/// Errors raised by [`crate::tableau::StabTableau`] while executing a
/// Clifford gate or query against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableauError {
    /// A qubit index was outside `[0, num_qubits)`.
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    /// A two-qubit gate was given the same qubit as both operands.
    DuplicateTarget { qubit: usize },
    /// The named gate has no tableau implementation.
    UnsupportedGate { name: &'static str },
}

impl fmt::Display for TableauError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QubitOutOfRange { qubit, num_qubits } => write!(
                f,
                "qubit index {qubit} is out of range for a {num_qubits}-qubit tableau"
            ),
            Self::DuplicateTarget { qubit } => {
                write!(f, "two-qubit gate given qubit {qubit} as both operands")
            }
            Self::UnsupportedGate { name } => {
                write!(f, "gate `{name}` has no tableau implementation")
            }
        }
    }
}

impl std::error::Error for TableauError {}
