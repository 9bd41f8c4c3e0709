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

//! The single-shot tableau+leakage stepper.

use std::collections::HashMap;
use std::sync::Arc;

use leaky_core::{DefaultRng, Pauli};
use leaky_qsim::{CliffordGateable, QuantumSimulator, StabTableau, StabilizerEngine};
use log::debug;
use rand::Rng;

use crate::circuit::{Circuit, CircuitInstruction};
use crate::error::LeakyError;
use crate::leakage_status::{LeakageStatus, TransitionType};
use crate::readout::ReadoutStrategy;
use crate::status_vec::StatusVec;
use crate::transition::Transition;
use crate::transition_collection::TransitionCollection;

/// Gate names dispatched as single-qubit Cliffords; the dispatcher only
/// needs to know each gate's single-/two-qubit arity to split its target
/// list. Named to match `leaky_qsim::CliffordGateable`'s method set,
/// following stim's gate-name convention.
const SINGLE_QUBIT_GATES: &[&str] = &[
    "I",
    "X",
    "Y",
    "Z",
    "H",
    "S",
    "SQRT_Z",
    "S_DAG",
    "SQRT_Z_DAG",
    "SQRT_X",
    "SQRT_X_DAG",
    "SQRT_Y",
    "SQRT_Y_DAG",
];

const TWO_QUBIT_GATES: &[&str] = &["CX", "CNOT", "CY", "CZ", "SWAP"];

const MEASURE_NAMES: &[&str] = &["M", "MZ"];
const RESET_NAMES: &[&str] = &["R", "RZ"];
const MEASURE_RESET_NAMES: &[&str] = &["MR", "MRZ"];
const UNSUPPORTED_BASIS_NAMES: &[&str] = &["MX", "MY", "RX", "RY", "MRX", "MRY", "MPP"];

fn arity(name: &str) -> Option<usize> {
    if SINGLE_QUBIT_GATES.contains(&name) {
        Some(1)
    } else if TWO_QUBIT_GATES.contains(&name) {
        Some(2)
    } else {
        None
    }
}

/// Splits a flat target list into gate-arity groups, one group per
/// single-qubit gate application or adjacent pair for a two-qubit gate
/// (one group per gate application).
fn split_targets(name: &str, targets: &[usize]) -> Result<Vec<Vec<usize>>, LeakyError> {
    match arity(name) {
        Some(1) => Ok(targets.iter().map(|&t| vec![t]).collect()),
        Some(2) => {
            if targets.len() % 2 != 0 {
                return Err(LeakyError::UnsupportedBasis {
                    gate_name: format!("{name} (odd target count {})", targets.len()),
                });
            }
            Ok(targets.chunks(2).map(<[usize]>::to_vec).collect())
        }
        None => Err(LeakyError::UnsupportedBasis {
            gate_name: name.to_string(),
        }),
    }
}

fn apply_clifford<E: CliffordGateable>(
    engine: &mut E,
    name: &str,
    targets: &[usize],
) -> Result<(), LeakyError> {
    match (name, targets) {
        ("I", [q]) => {
            engine.identity(*q);
        }
        ("X", [q]) => {
            engine.x(*q);
        }
        ("Y", [q]) => {
            engine.y(*q);
        }
        ("Z", [q]) => {
            engine.z(*q);
        }
        ("H", [q]) => {
            engine.h(*q);
        }
        ("S" | "SQRT_Z", [q]) => {
            engine.sz(*q);
        }
        ("S_DAG" | "SQRT_Z_DAG", [q]) => {
            engine.szdg(*q);
        }
        ("SQRT_X", [q]) => {
            engine.sx(*q);
        }
        ("SQRT_X_DAG", [q]) => {
            engine.sxdg(*q);
        }
        ("SQRT_Y", [q]) => {
            engine.sy(*q);
        }
        ("SQRT_Y_DAG", [q]) => {
            engine.sydg(*q);
        }
        ("CX" | "CNOT", [q1, q2]) => {
            engine.cx(*q1, *q2);
        }
        ("CY", [q1, q2]) => {
            engine.cy(*q1, *q2);
        }
        ("CZ", [q1, q2]) => {
            engine.cz(*q1, *q2);
        }
        ("SWAP", [q1, q2]) => {
            engine.swap(*q1, *q2);
        }
        _ => {
            return Err(LeakyError::UnsupportedBasis {
                gate_name: name.to_string(),
            })
        }
    }
    Ok(())
}

fn apply_pauli<E: CliffordGateable>(engine: &mut E, pauli: Pauli, target: usize) {
    match pauli {
        Pauli::I => {
            engine.identity(target);
        }
        Pauli::X => {
            engine.x(target);
        }
        Pauli::Y => {
            engine.y(target);
        }
        Pauli::Z => {
            engine.z(target);
        }
    }
}

/// The single-shot stepper: a `StatusVec`, an external stabilizer engine,
/// a shared `TransitionCollection`, and the classical control registers
/// that select among its guarded tables.
///
/// Generic over the stabilizer engine `E` so a shot can run against any
/// `StabilizerEngine` implementation; `Simulator::new`/`with_seed` build one
/// against the workspace's own [`StabTableau`].
pub struct Simulator<E: StabilizerEngine = StabTableau<DefaultRng>> {
    num_qubits: usize,
    status_vec: StatusVec,
    engine: E,
    transitions: Arc<TransitionCollection>,
    rng: DefaultRng,
    measurement_status: Vec<u8>,
    single_qubit_transition_controls: HashMap<usize, i64>,
    two_qubit_transition_controls: HashMap<(usize, usize), i64>,
}

impl Simulator<StabTableau<DefaultRng>> {
    /// Builds a simulator over a fresh [`StabTableau`], seeded from OS
    /// entropy.
    #[must_use]
    pub fn new(num_qubits: usize, transitions: Arc<TransitionCollection>) -> Self {
        Self::with_engine(StabTableau::new(num_qubits), transitions, None)
    }

    /// Builds a simulator over a fresh [`StabTableau`], seeded
    /// deterministically. The same seed drives both the tableau's internal
    /// measurement-branch RNG and the simulator's own transition-sampling
    /// RNG, mirroring a single `seed` parameter driving both the
    /// classical RNG and the stabilizer engine's branch choices.
    #[must_use]
    pub fn with_seed(num_qubits: usize, transitions: Arc<TransitionCollection>, seed: u64) -> Self {
        Self::with_engine(StabTableau::with_seed(num_qubits, seed), transitions, Some(seed))
    }
}

impl<E: StabilizerEngine> Simulator<E> {
    /// Builds a simulator over a caller-supplied engine. `seed` drives only
    /// the simulator's own transition-sampling RNG; the engine is assumed
    /// already seeded by the caller.
    #[must_use]
    pub fn with_engine(engine: E, transitions: Arc<TransitionCollection>, seed: Option<u64>) -> Self {
        let num_qubits = engine.num_qubits();
        Self {
            num_qubits,
            status_vec: StatusVec::new(num_qubits),
            engine,
            transitions,
            rng: leaky_core::new_rng(seed),
            measurement_status: Vec::new(),
            single_qubit_transition_controls: HashMap::new(),
            two_qubit_transition_controls: HashMap::new(),
        }
    }

    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[must_use]
    pub fn transition_collection(&self) -> &TransitionCollection {
        &self.transitions
    }

    #[must_use]
    pub fn single_qubit_transition_controls(&self) -> &HashMap<usize, i64> {
        &self.single_qubit_transition_controls
    }

    #[must_use]
    pub fn two_qubit_transition_controls(&self) -> &HashMap<(usize, usize), i64> {
        &self.two_qubit_transition_controls
    }

    /// Merges `controls` into the single-qubit classical control register
    /// consulted by guard predicates.
    pub fn set_single_qubit_transition_controls(&mut self, controls: HashMap<usize, i64>) {
        self.single_qubit_transition_controls.extend(controls);
    }

    /// Merges `controls` into the two-qubit classical control register.
    pub fn set_two_qubit_transition_controls(&mut self, controls: HashMap<(usize, usize), i64>) {
        self.two_qubit_transition_controls.extend(controls);
    }

    /// The live leakage status of a qubit group, without mutating anything.
    #[must_use]
    pub fn current_status(&self, targets: &[usize]) -> LeakageStatus {
        self.status_vec.status(targets)
    }

    /// Applies a single named instruction.
    pub fn do_gate(
        &mut self,
        name: &str,
        targets: &[usize],
        args: &[f64],
        add_noise: bool,
    ) -> Result<(), LeakyError> {
        if MEASURE_NAMES.contains(&name) {
            self.measure(targets, args.first().copied());
            return Ok(());
        }
        if RESET_NAMES.contains(&name) {
            self.reset(targets, args.first().copied());
            return Ok(());
        }
        if MEASURE_RESET_NAMES.contains(&name) {
            self.measure(targets, None);
            self.reset(targets, None);
            return Ok(());
        }
        if UNSUPPORTED_BASIS_NAMES.contains(&name) {
            return Err(LeakyError::UnsupportedBasis {
                gate_name: name.to_string(),
            });
        }

        for group in split_targets(name, targets)? {
            self.do_group(name, &group, add_noise)?;
        }
        Ok(())
    }

    fn do_group(&mut self, name: &str, targets: &[usize], add_noise: bool) -> Result<(), LeakyError> {
        let current_status = self.status_vec.status(targets);
        let sq_ctrl = match targets {
            [q] => self.single_qubit_transition_controls.get(q).copied(),
            _ => None,
        };
        let dq_ctrl = match targets {
            [q1, q2] => self.two_qubit_transition_controls.get(&(*q1, *q2)).copied(),
            _ => None,
        };
        let table = self.transitions.lookup(name, current_status, sq_ctrl, dq_ctrl);

        if current_status.is_fully_computational() {
            debug!("forwarding {name} on {targets:?} to the stabilizer engine");
            apply_clifford(&mut self.engine, name, targets)?;
        }

        let Some(table) = table else {
            return Ok(());
        };
        if !add_noise {
            return Ok(());
        }

        debug!("sampling a transition for {name} on {targets:?} at status {current_status}");
        let transition = table.sample(current_status, &mut self.rng);
        self.apply_transition(targets, &transition)
    }

    /// Z-basis measurement of `targets`, capturing the pre-measurement
    /// leakage label before invoking the engine, so an `MR`/`MRZ` gate's
    /// captured label reflects the pre-reset state, not the post-reset one.
    /// `flip_probability`,
    /// when given, is realized as a calibrated bit-flip immediately before
    /// the measurement, matching stim's `M(p)` argument convention.
    pub fn measure(&mut self, targets: &[usize], flip_probability: Option<f64>) {
        for &t in targets {
            self.measurement_status.push(self.status_vec.label(t));
        }
        for &t in targets {
            if let Some(p) = flip_probability {
                self.engine.x_error(t, p);
            }
            self.engine.mz(t);
        }
    }

    /// Z-basis reset of `targets`. `flip_probability`, when given, is
    /// realized as a calibrated bit-flip immediately after the reset,
    /// matching stim's `R(p)` argument convention.
    pub fn reset(&mut self, targets: &[usize], flip_probability: Option<f64>) {
        self.status_vec.reset(targets);
        for &t in targets {
            self.engine.reset_z(t);
            if let Some(p) = flip_probability {
                self.engine.x_error(t, p);
            }
        }
    }

    fn apply_transition(&mut self, targets: &[usize], transition: &Transition) -> Result<(), LeakyError> {
        self.status_vec.apply_transition(targets, transition);
        let mut r_targets = Vec::new();
        for (&t, ty) in targets.iter().zip(transition.transition_types()) {
            match ty {
                TransitionType::Up => {
                    self.engine.x_error(t, 0.5);
                    self.engine.reset_z(t);
                }
                TransitionType::Down => {
                    self.engine.reset_z(t);
                    self.engine.x_error(t, 0.5);
                }
                TransitionType::Remain => r_targets.push(t),
                TransitionType::LeakageToLeakage => {}
            }
        }
        if !r_targets.is_empty() {
            let pauli_index = transition.pauli_index.ok_or_else(|| {
                LeakyError::InternalConsistency(format!(
                    "transition {} -> {} has R-targets but no pauli_index",
                    transition.initial_status, transition.final_status
                ))
            })?;
            let paulis = Transition::decode_pauli_string(pauli_index, r_targets.len());
            for (&t, pauli) in r_targets.iter().zip(paulis) {
                apply_pauli(&mut self.engine, pauli, t);
            }
        }
        Ok(())
    }

    /// Projects the raw leakage-labeled measurement record into one of the
    /// three output conventions.
    #[must_use]
    pub fn current_measurement_record(&mut self, strategy: ReadoutStrategy) -> Vec<i64> {
        let record: Vec<bool> = self.engine.current_measurement_record().to_vec();
        record
            .iter()
            .zip(&self.measurement_status)
            .map(|(&m, &s)| match strategy {
                ReadoutStrategy::RawLabel => {
                    if s == 0 {
                        i64::from(m)
                    } else {
                        i64::from(s) + 1
                    }
                }
                ReadoutStrategy::RandomLeakageProjection => {
                    if s == 0 {
                        i64::from(m)
                    } else {
                        i64::from(self.rng.random_bool(0.5))
                    }
                }
                ReadoutStrategy::DeterministicLeakageProjection => {
                    if s == 0 {
                        i64::from(m)
                    } else {
                        1
                    }
                }
            })
            .collect()
    }

    /// Replays a whole [`Circuit`]: repeat blocks are expanded recursively,
    /// annotation-only
    /// instructions are skipped, and `qubits_map` (if given) remaps circuit
    /// qubit indices onto this simulator's own `0..num_qubits`.
    pub fn do_circuit(
        &mut self,
        circuit: &Circuit,
        qubits_map: Option<&HashMap<usize, usize>>,
    ) -> Result<(), LeakyError> {
        if circuit.num_qubits != self.num_qubits {
            return Err(LeakyError::QubitCountMismatch {
                expected: self.num_qubits,
                actual: circuit.num_qubits,
            });
        }
        self.do_instructions(&circuit.instructions, qubits_map)
    }

    fn do_instructions(
        &mut self,
        instructions: &[CircuitInstruction],
        qubits_map: Option<&HashMap<usize, usize>>,
    ) -> Result<(), LeakyError> {
        for instruction in instructions {
            match instruction {
                CircuitInstruction::Annotation(_) => {}
                CircuitInstruction::Repeat { body, repeat_count } => {
                    for _ in 0..*repeat_count {
                        self.do_instructions(body, qubits_map)?;
                    }
                }
                CircuitInstruction::Gate { name, targets, args } => {
                    let mapped: Vec<usize> = match qubits_map {
                        Some(map) => targets.iter().map(|t| map.get(t).copied().unwrap_or(*t)).collect(),
                        None => targets.clone(),
                    };
                    self.do_gate(name, &mapped, args, true)?;
                }
            }
        }
        Ok(())
    }
}
