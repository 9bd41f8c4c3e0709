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

use rand::SeedableRng;
pub use rand_chacha::ChaCha8Rng as DefaultRng;

/// Build the crate's default RNG, seeded deterministically when `seed` is
/// given and from OS entropy otherwise.
///
/// # Examples
/// ```rust
/// use leaky_core::new_rng;
/// let mut rng = new_rng(Some(42));
/// let mut other = new_rng(Some(42));
/// use rand::Rng;
/// let a: u32 = rng.gen();
/// let b: u32 = other.gen();
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn new_rng(seed: Option<u64>) -> DefaultRng {
    match seed {
        Some(seed) => DefaultRng::seed_from_u64(seed),
        None => DefaultRng::from_entropy(),
    }
}
