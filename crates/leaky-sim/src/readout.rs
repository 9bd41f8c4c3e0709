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

/// Output convention for projecting a raw leakage-labeled measurement
/// record into small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutStrategy {
    /// Emit `m` when computational, or `status + 1` when leaked (so `|2>`
    /// reads back as `2`, `|3>` as `3`, ...). This asymmetry against the
    /// computational `0`/`1` convention is intentional and
    /// downstream detector conversion treats labels `> 1` as nonphysical.
    RawLabel,
    /// Emit `m` when computational, or a fair coin flip in `{0, 1}` when
    /// leaked.
    RandomLeakageProjection,
    /// Emit `m` when computational, or `1` when leaked.
    DeterministicLeakageProjection,
}

impl ReadoutStrategy {
    /// `true` for the two strategies that only ever emit `0`/`1`, which is
    /// what [`crate::sampler::Sampler::sample_detectors`] requires.
    #[must_use]
    pub fn is_boolean(self) -> bool {
        !matches!(self, Self::RawLabel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_raw_label_is_non_boolean() {
        assert!(!ReadoutStrategy::RawLabel.is_boolean());
        assert!(ReadoutStrategy::RandomLeakageProjection.is_boolean());
        assert!(ReadoutStrategy::DeterministicLeakageProjection.is_boolean());
    }
}
