//! Per-page duration mode selection.

use pages_spec::{DurationMode, ModePolicy};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::rng::{self, create_component_rng};

/// Infinite iterator of duration modes, one per page.
#[derive(Debug, Clone)]
pub enum ModeSequence {
    /// The same mode on every page.
    Constant(DurationMode),
    /// A repeating pattern.
    Cycle {
        /// Modes to repeat.
        pattern: Vec<DurationMode>,
        /// Index of the next mode.
        next: usize,
    },
    /// Short with a fixed probability.
    Random {
        /// Probability that a page is short.
        short_probability: f64,
        /// Stream deciding each page.
        rng: Pcg32,
    },
}

impl ModeSequence {
    /// Builds the mode sequence of a policy, seeding random policies from
    /// `base_seed` unless they carry their own seed.
    pub fn from_policy(policy: &ModePolicy, base_seed: u32) -> Self {
        match policy {
            ModePolicy::AlwaysShort => ModeSequence::Constant(DurationMode::Short),
            ModePolicy::AlwaysLong => ModeSequence::Constant(DurationMode::Long),
            ModePolicy::Cycle { pattern } => ModeSequence::Cycle {
                pattern: pattern.clone(),
                next: 0,
            },
            ModePolicy::Random {
                short_probability,
                seed,
            } => ModeSequence::Random {
                short_probability: if short_probability.is_nan() {
                    1.0
                } else {
                    short_probability.clamp(0.0, 1.0)
                },
                rng: create_component_rng(*seed, base_seed, rng::DURATION_MODES),
            },
        }
    }
}

impl Default for ModeSequence {
    fn default() -> Self {
        ModeSequence::Constant(DurationMode::Short)
    }
}

impl Iterator for ModeSequence {
    type Item = DurationMode;

    fn next(&mut self) -> Option<DurationMode> {
        let mode = match self {
            ModeSequence::Constant(mode) => *mode,
            ModeSequence::Cycle { pattern, next } => {
                if pattern.is_empty() {
                    DurationMode::Short
                } else {
                    let mode = pattern[*next % pattern.len()];
                    *next = (*next + 1) % pattern.len();
                    mode
                }
            }
            ModeSequence::Random {
                short_probability,
                rng,
            } => {
                if rng.gen_bool(*short_probability) {
                    DurationMode::Short
                } else {
                    DurationMode::Long
                }
            }
        };
        Some(mode)
    }
}
