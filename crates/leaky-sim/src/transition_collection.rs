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

use std::collections::HashMap;

use crate::error::LeakyError;
use crate::leakage_status::LeakageStatus;
use crate::transition_table::TransitionTable;

/// A predicate consulted by [`TransitionCollection::lookup`] to select a
/// table among several registered for the same gate name.
///
/// Represented as a tagged enum rather than a boxed closure so a
/// [`TransitionCollection`] stays
/// `Clone` and trivially shareable across shot workers without any
/// `Send + Sync` bookkeeping on function pointers.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// Matches unconditionally.
    Always,
    /// Matches only when the current leakage status equals the given one.
    StatusEquals(LeakageStatus),
    /// Matches only when the single-qubit control register holds this value.
    SingleQubitControlEquals(i64),
    /// Matches only when the two-qubit control register holds this value.
    TwoQubitControlEquals(i64),
    /// Matches only when every sub-guard matches.
    All(Vec<Guard>),
}

impl Guard {
    #[must_use]
    pub fn matches(
        &self,
        status: LeakageStatus,
        sq_ctrl: Option<i64>,
        dq_ctrl: Option<i64>,
    ) -> bool {
        match self {
            Self::Always => true,
            Self::StatusEquals(expected) => status == *expected,
            Self::SingleQubitControlEquals(expected) => sq_ctrl == Some(*expected),
            Self::TwoQubitControlEquals(expected) => dq_ctrl == Some(*expected),
            Self::All(guards) => guards.iter().all(|g| g.matches(status, sq_ctrl, dq_ctrl)),
        }
    }
}

struct Entry {
    table: TransitionTable,
    guard: Guard,
}

/// Registry of conditional [`TransitionTable`]s keyed by gate name.
///
/// Within a gate's list, entries are consulted in insertion order and the
/// first matching guard wins, so classical-control-dependent
/// and status-dependent noise can be layered by registering a specific guard
/// before a catch-all `Guard::Always` table.
#[derive(Default)]
pub struct TransitionCollection {
    tables: HashMap<String, Vec<Entry>>,
}

impl TransitionCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` for `gate_name`, guarded by `guard` (defaults to
    /// [`Guard::Always`] when `None`). When `safety_check` is `true`, the
    /// table's [`TransitionTable::validate`] must pass or this call fails,
    /// mirroring `generalized_pauli_twirling`'s `safety_check` parameter.
    pub fn register(
        &mut self,
        gate_name: impl Into<String>,
        table: TransitionTable,
        guard: Option<Guard>,
        safety_check: bool,
    ) -> Result<(), LeakyError> {
        if safety_check {
            table.validate()?;
        }
        self.tables
            .entry(gate_name.into())
            .or_default()
            .push(Entry {
                table,
                guard: guard.unwrap_or(Guard::Always),
            });
        Ok(())
    }

    #[must_use]
    pub fn has_table_for(&self, gate_name: &str) -> bool {
        self.tables.contains_key(gate_name)
    }

    /// Walks the list registered for `gate_name` and returns the first table
    /// whose guard matches, or `None` if no table is registered for this
    /// gate or none of its guards match.
    #[must_use]
    pub fn lookup(
        &self,
        gate_name: &str,
        status: LeakageStatus,
        sq_ctrl: Option<i64>,
        dq_ctrl: Option<i64>,
    ) -> Option<&TransitionTable> {
        self.tables.get(gate_name).and_then(|entries| {
            entries
                .iter()
                .find(|e| e.guard.matches(status, sq_ctrl, dq_ctrl))
                .map(|e| &e.table)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Transition;

    fn status(levels: &[u8]) -> LeakageStatus {
        LeakageStatus::new(levels)
    }

    fn identity_table() -> TransitionTable {
        let mut table = TransitionTable::new();
        table.push(Transition::new(status(&[0]), status(&[0]), 1.0, Some(0)));
        table
    }

    #[test]
    fn lookup_returns_none_for_unregistered_gate() {
        let collection = TransitionCollection::new();
        assert!(collection
            .lookup("H", status(&[0]), None, None)
            .is_none());
    }

    #[test]
    fn first_matching_guard_wins() {
        let mut collection = TransitionCollection::new();
        collection
            .register(
                "H",
                identity_table(),
                Some(Guard::StatusEquals(status(&[1]))),
                true,
            )
            .unwrap();
        let mut fallback = TransitionTable::new();
        fallback.push(Transition::new(status(&[0]), status(&[1]), 1.0, None));
        collection.register("H", fallback, None, true).unwrap();

        let table = collection.lookup("H", status(&[0]), None, None).unwrap();
        assert_eq!(table.probability(status(&[0]), status(&[1]), None), 1.0);
    }

    #[test]
    fn register_rejects_invalid_table_when_safety_checked() {
        let mut collection = TransitionCollection::new();
        let mut bad = TransitionTable::new();
        bad.push(Transition::new(status(&[0]), status(&[0]), 0.4, Some(0)));
        assert!(collection.register("H", bad, None, true).is_err());
    }
}
