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

use super::quantum_simulator::QuantumSimulator;

/// Outcome of a single-qubit Pauli-basis measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementResult {
    /// `true` for the -1 eigenstate, `false` for the +1 eigenstate.
    pub outcome: bool,
    /// `true` if the qubit was already in an eigenstate of the measured
    /// operator (the engine didn't have to pick a branch at random).
    pub is_deterministic: bool,
}

/// A simulator trait for quantum systems that implement Clifford operations.
///
/// Gates transform Pauli operators according to their Heisenberg
/// representation; see Gottesman, "The Heisenberg Representation of Quantum
/// Computers" (<https://arxiv.org/abs/quant-ph/9807006>) for the reference
/// algorithm this trait's tableau implementation follows.
///
/// # Required Implementations
/// `sz`, `h`, `cx`, and `mz` must be provided; every other method has a
/// default implementation in terms of those four. Implementors may override
/// any default for efficiency.
#[expect(clippy::min_ident_chars)]
pub trait CliffordGateable: QuantumSimulator {
    /// Identity; leaves the state unchanged.
    #[inline]
    fn identity(&mut self, _q: usize) -> &mut Self {
        self
    }

    /// Pauli X. `X -> X, Y -> -Y, Z -> -Z`.
    #[inline]
    fn x(&mut self, q: usize) -> &mut Self {
        self.h(q).z(q).h(q)
    }

    /// Pauli Y. `X -> -X, Y -> Y, Z -> -Z`.
    #[inline]
    fn y(&mut self, q: usize) -> &mut Self {
        self.z(q).x(q)
    }

    /// Pauli Z. `X -> -X, Y -> -Y, Z -> Z`.
    #[inline]
    fn z(&mut self, q: usize) -> &mut Self {
        self.sz(q).sz(q)
    }

    /// Square root of X. `X -> X, Y -> Z, Z -> -Y`.
    #[inline]
    fn sx(&mut self, q: usize) -> &mut Self {
        self.h(q).sz(q).h(q)
    }

    /// Adjoint of [`CliffordGateable::sx`].
    #[inline]
    fn sxdg(&mut self, q: usize) -> &mut Self {
        self.h(q).szdg(q).h(q)
    }

    /// Square root of Y. `X -> -Z, Y -> Y, Z -> X`.
    #[inline]
    fn sy(&mut self, q: usize) -> &mut Self {
        self.h(q).x(q)
    }

    /// Adjoint of [`CliffordGateable::sy`].
    #[inline]
    fn sydg(&mut self, q: usize) -> &mut Self {
        self.x(q).h(q)
    }

    /// Square root of Z (the S gate). `X -> Y, Y -> -X, Z -> Z`.
    fn sz(&mut self, q: usize) -> &mut Self;

    /// Adjoint of [`CliffordGateable::sz`] (`S_DAG`).
    #[inline]
    fn szdg(&mut self, q: usize) -> &mut Self {
        self.z(q).sz(q)
    }

    /// Hadamard. `X -> Z, Y -> -Y, Z -> X`.
    fn h(&mut self, q: usize) -> &mut Self;

    /// Controlled-NOT. Control `q1`, target `q2`.
    fn cx(&mut self, q1: usize, q2: usize) -> &mut Self;

    /// Controlled-Y.
    #[inline]
    fn cy(&mut self, q1: usize, q2: usize) -> &mut Self {
        self.sz(q2).cx(q1, q2).szdg(q2)
    }

    /// Controlled-Z.
    #[inline]
    fn cz(&mut self, q1: usize, q2: usize) -> &mut Self {
        self.h(q2).cx(q1, q2).h(q2)
    }

    /// SWAP.
    #[inline]
    fn swap(&mut self, q1: usize, q2: usize) -> &mut Self {
        self.cx(q1, q2).cx(q2, q1).cx(q1, q2)
    }

    /// Z-basis measurement: `outcome = true` means the -1 (i.e. `|1>`)
    /// eigenstate was observed.
    fn mz(&mut self, q: usize) -> MeasurementResult;

    /// X-basis measurement, implemented as `H; mz; H`.
    #[inline]
    fn mx(&mut self, q: usize) -> MeasurementResult {
        self.h(q);
        let meas = self.mz(q);
        self.h(q);
        meas
    }

    /// Y-basis measurement, implemented as `sxdg; mz; sx`.
    #[inline]
    fn my(&mut self, q: usize) -> MeasurementResult {
        self.sxdg(q);
        let meas = self.mz(q);
        self.sx(q);
        meas
    }

    /// Projects the qubit onto `|0>`, applying a correcting X if needed.
    ///
    /// This default goes through [`CliffordGateable::mz`] for simplicity,
    /// which is only correct for implementors with no separate measurement
    /// record. An implementor that tracks one (e.g. a
    /// [`crate::stabilizer_engine::StabilizerEngine`]) must override this so
    /// the projection doesn't extend that record — only a real measurement
    /// does.
    #[inline]
    fn reset_z(&mut self, q: usize) -> &mut Self {
        if self.mz(q).outcome {
            self.x(q);
        }
        self
    }
}
