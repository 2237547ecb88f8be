//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the generator flows through this module. Each sampler owns
//! the stream it is handed; streams are never shared, so the output of one
//! sampler does not depend on how often another one was called.

use pages_spec::derive_component_seed;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Component key of the segment-width stream of the envelope builder.
pub const SEGMENT_WIDTHS: &str = "segment_widths";
/// Component key of the per-voice event-count stream.
pub const EVENT_COUNTS: &str = "event_counts";
/// Component key of the stream that fabricates sample counts for resting voices.
pub const REST_SAMPLE_COUNTS: &str = "rest_sample_counts";
/// Component key of the random duration-mode policy.
pub const DURATION_MODES: &str = "duration_modes";
/// Component key of the restrictive-segment percentage sampler.
pub const MINIMUM_PERCENTAGE: &str = "minimum_percentage";
/// Component key of the permissive-segment percentage sampler.
pub const MAXIMUM_PERCENTAGE: &str = "maximum_percentage";
/// Component key of the short minimum-duration sampler.
pub const SHORT_MINIMUM_DURATION: &str = "short_minimum_duration";
/// Component key of the short maximum-duration sampler.
pub const SHORT_MAXIMUM_DURATION: &str = "short_maximum_duration";
/// Component key of the long minimum-duration sampler.
pub const LONG_MINIMUM_DURATION: &str = "long_minimum_duration";
/// Component key of the long maximum-duration sampler.
pub const LONG_MAXIMUM_DURATION: &str = "long_maximum_duration";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Resolves the seed of a component: the explicit seed if given, otherwise one
/// derived from the run seed and the component key.
pub fn resolve_seed(explicit: Option<u32>, base_seed: u32, key: &str) -> u32 {
    explicit.unwrap_or_else(|| derive_component_seed(base_seed, key))
}

/// Creates the RNG of a named component.
pub fn create_component_rng(explicit: Option<u32>, base_seed: u32, key: &str) -> Pcg32 {
    create_rng(resolve_seed(explicit, base_seed, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        let values1: Vec<f64> = (0..100).map(|_| rng1.gen()).collect();
        let values2: Vec<f64> = (0..100).map(|_| rng2.gen()).collect();

        assert_eq!(values1, values2);
    }

    #[test]
    fn test_explicit_seed_wins() {
        assert_eq!(resolve_seed(Some(7), 42, EVENT_COUNTS), 7);
        assert_eq!(
            resolve_seed(None, 42, EVENT_COUNTS),
            derive_component_seed(42, EVENT_COUNTS)
        );
    }

    #[test]
    fn test_component_streams_are_independent() {
        let mut counts = create_component_rng(None, 42, EVENT_COUNTS);
        let mut widths = create_component_rng(None, 42, SEGMENT_WIDTHS);

        let values0: Vec<u32> = (0..10).map(|_| counts.gen()).collect();
        let values1: Vec<u32> = (0..10).map(|_| widths.gen()).collect();

        assert_ne!(values0, values1);
    }
}
