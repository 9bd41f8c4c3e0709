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

//! Shared primitives used by both the stabilizer-engine crate (`leaky-qsim`)
//! and the leakage-aware simulator crate (`leaky-sim`).

pub mod pauli;
pub mod rng;

pub use pauli::Pauli;
pub use rng::{new_rng, DefaultRng};
