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

//! End-to-end simulator scenarios, one per row of the spec's testable
//! properties table (E1-E5).

use std::sync::Arc;

use leaky_sim::{LeakageStatus, LeakyError, ReadoutStrategy, Simulator, Transition, TransitionCollection, TransitionTable};

fn status(levels: &[u8]) -> LeakageStatus {
    LeakageStatus::new(levels)
}

fn deterministic_row(initial: &[u8], r#final: &[u8], pauli_index: Option<u32>) -> TransitionTable {
    let mut table = TransitionTable::new();
    table.push(Transition::new(status(initial), status(r#final), 1.0, pauli_index));
    table
}

#[test]
fn e1_noiseless_bell_pairs_are_correlated() {
    let _ = env_logger::try_init();
    let mut sim = Simulator::with_seed(4, Arc::new(TransitionCollection::new()), 123);
    sim.do_gate("R", &[0, 1, 2, 3], &[], true).unwrap();
    sim.do_gate("H", &[0], &[], true).unwrap();
    sim.do_gate("H", &[2], &[], true).unwrap();
    sim.do_gate("CX", &[0, 1], &[], true).unwrap();
    sim.do_gate("CX", &[2, 3], &[], true).unwrap();
    sim.do_gate("M", &[0, 1, 2, 3], &[], true).unwrap();

    let record = sim.current_measurement_record(ReadoutStrategy::RawLabel);
    assert_eq!(record[0], record[1]);
    assert_eq!(record[2], record[3]);
}

#[test]
fn e2_forced_single_qubit_leakage_trajectory() {
    // One table, three rows (one per initial status along the trajectory):
    // (0,)->(1,), (1,)->(2,), (2,)->(0,), each probability 1.
    let mut table = TransitionTable::new();
    table.push(Transition::new(status(&[0]), status(&[1]), 1.0, None));
    table.push(Transition::new(status(&[1]), status(&[2]), 1.0, None));
    table.push(Transition::new(status(&[2]), status(&[0]), 1.0, None));
    let mut collection = TransitionCollection::new();
    collection.register("H", table, None, false).unwrap();
    let mut sim = Simulator::with_seed(1, Arc::new(collection), 7);

    sim.do_gate("H", &[0], &[], true).unwrap(); // 0 -> 1
    sim.do_gate("M", &[0], &[], true).unwrap();
    assert_eq!(sim.current_measurement_record(ReadoutStrategy::RawLabel), [2]);

    sim.do_gate("X", &[0], &[], true).unwrap(); // no table for X at status 1: no-op
    sim.do_gate("M", &[0], &[], true).unwrap();
    assert_eq!(
        sim.current_measurement_record(ReadoutStrategy::RawLabel)[1],
        2
    );

    sim.do_gate("H", &[0], &[], true).unwrap(); // 1 -> 2
    sim.do_gate("M", &[0], &[], true).unwrap();
    assert_eq!(
        sim.current_measurement_record(ReadoutStrategy::RawLabel)[2],
        3
    );

    sim.do_gate("H", &[0], &[], true).unwrap(); // 2 -> 0 (deleak)
    sim.do_gate("M", &[0], &[], true).unwrap();
    let tail = sim.current_measurement_record(ReadoutStrategy::RawLabel)[3];
    assert!(tail == 0 || tail == 1);

    sim.do_gate("R", &[0], &[], true).unwrap();
    sim.do_gate("M", &[0], &[], true).unwrap();
    assert_eq!(
        sim.current_measurement_record(ReadoutStrategy::RawLabel)[4],
        0
    );
}

#[test]
fn e3_forced_pauli_twirl_on_remain() {
    // (0,) -> (0,) with pauli_index = 3 (Z), probability 1.
    let mut collection = TransitionCollection::new();
    collection
        .register("H", deterministic_row(&[0], &[0], Some(3)), None, true)
        .unwrap();
    let mut sim = Simulator::with_seed(1, Arc::new(collection), 11);

    sim.do_gate("H", &[0], &[], true).unwrap(); // H; twirled Z
    sim.do_gate("H", &[0], &[], false).unwrap(); // H, noise suppressed
    sim.do_gate("M", &[0], &[], true).unwrap();

    assert_eq!(sim.current_measurement_record(ReadoutStrategy::RawLabel), [1]);
}

#[test]
fn e4_forced_two_qubit_leakage_trajectory() {
    // One table, one row per leg of the trajectory, keyed by that leg's
    // initial status (a TransitionCollection entry's guard is consulted
    // per *gate name*, not per status, so all four legs live in a single
    // registered table rather than four Guard::Always entries that would
    // shadow one another).
    let mut table = TransitionTable::new();
    table.push(Transition::new(status(&[0, 0]), status(&[0, 1]), 1.0, Some(1)));
    table.push(Transition::new(status(&[0, 1]), status(&[0, 2]), 1.0, Some(1)));
    table.push(Transition::new(status(&[0, 2]), status(&[1, 2]), 1.0, None));
    table.push(Transition::new(status(&[1, 2]), status(&[0, 0]), 1.0, None));
    let mut collection = TransitionCollection::new();
    collection.register("CZ", table, None, true).unwrap();
    let mut sim = Simulator::with_seed(2, Arc::new(collection), 5);

    sim.do_gate("CZ", &[0, 1], &[], true).unwrap();
    sim.do_gate("M", &[0, 1], &[], true).unwrap();
    assert_eq!(sim.current_measurement_record(ReadoutStrategy::RawLabel), [1, 2]);

    sim.do_gate("CZ", &[0, 1], &[], true).unwrap();
    sim.do_gate("M", &[0, 1], &[], true).unwrap();
    let record = sim.current_measurement_record(ReadoutStrategy::RawLabel);
    assert_eq!(&record[2..4], [0, 3]);

    sim.do_gate("CZ", &[0, 1], &[], true).unwrap();
    sim.do_gate("M", &[0, 1], &[], true).unwrap();
    let record = sim.current_measurement_record(ReadoutStrategy::RawLabel);
    assert_eq!(&record[4..6], [2, 3]);

    sim.do_gate("CZ", &[0, 1], &[], true).unwrap();
    sim.do_gate("M", &[0, 1], &[], true).unwrap();
    let record = sim.current_measurement_record(ReadoutStrategy::RawLabel);
    assert!(record[6] == 0 || record[6] == 1);
    assert!(record[7] == 0 || record[7] == 1);
}

#[test]
fn e5_unsupported_basis_is_rejected() {
    let mut sim = Simulator::with_seed(1, Arc::new(TransitionCollection::new()), 0);
    let err = sim.do_gate("MX", &[0], &[], true).unwrap_err();
    assert!(matches!(err, LeakyError::UnsupportedBasis { .. }));
}
