//! Top-level generation entry point.

use pages_spec::{canonical_value_hash, validate_config, PageSequence, PagesConfig};

use crate::duration::DurationRangeSampler;
use crate::error::GenerateError;
use crate::event_count::EventCountSampler;
use crate::event_count_envelope::EventCountEnvelopeBuilder;
use crate::mode::ModeSequence;
use crate::page_sequence::PageSequenceBuilder;
use crate::rng::{self, create_component_rng};

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Generated pages.
    pub pages: PageSequence,
    /// BLAKE3 hash of the canonical JSON of `pages`.
    pub hash: String,
}

/// Generates the page sequence described by `config`.
///
/// The config is validated first; all problems are reported together as
/// [`GenerateError::InvalidConfig`].
pub fn generate_pages(config: &PagesConfig) -> Result<GenerateResult, GenerateError> {
    let validation = validate_config(config);
    for warning in &validation.warnings {
        log::warn!("{}", warning);
    }
    if !validation.is_ok() {
        return Err(GenerateError::InvalidConfig(validation.errors));
    }

    let maximum_envelope = EventCountEnvelopeBuilder::from_config(config)?
        .build(config.voice_count, config.page_count)?;
    let event_counts = EventCountSampler::new(
        config.minimum_event_count,
        config.maximum_event_count,
        maximum_envelope,
        create_component_rng(None, config.seed, rng::EVENT_COUNTS),
    )?;
    let durations = DurationRangeSampler::from_config(config)?;
    let modes = ModeSequence::from_policy(&config.duration_mode, config.seed);

    let pages = PageSequenceBuilder::new(event_counts, durations).build(
        config.voice_count,
        config.page_count,
        modes,
    )?;
    let hash = canonical_value_hash(&pages)?;

    log::info!(
        "generated {} pages for {} voices (seed {}, hash {})",
        pages.len(),
        config.voice_count,
        config.seed,
        hash
    );
    Ok(GenerateResult { pages, hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pages_spec::ErrorCode;

    fn small_config(seed: u32) -> PagesConfig {
        let mut config = PagesConfig::default();
        config.seed = seed;
        config.page_count = 20;
        config
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_pages(&small_config(42)).unwrap();
        let b = generate_pages(&small_config(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_pages(&small_config(1)).unwrap();
        let b = generate_pages(&small_config(2)).unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_invalid_config_reports_all_errors() {
        let mut config = small_config(1);
        config.voice_count = 0;
        config.page_count = 0;
        match generate_pages(&config).unwrap_err() {
            GenerateError::InvalidConfig(errors) => {
                let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
                assert!(codes.contains(&ErrorCode::InvalidVoiceCount));
                assert!(codes.contains(&ErrorCode::InvalidPageCount));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_event_counts_are_reported_not_panicking() {
        let mut config = small_config(3);
        config.voice_count = 2;
        config.page_count = 1;
        config.minimum_event_count = 3_000_000_000;
        config.maximum_event_count = 3_000_000_000;
        match generate_pages(&config).unwrap_err() {
            GenerateError::InvalidConfig(errors) => {
                assert!(errors.iter().any(|e| e.code == ErrorCode::EventCountOverflow));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_point_likelihood_is_reported_not_hanging() {
        let mut config = small_config(3);
        config.short_durations.minimum =
            pages_spec::SamplerConfig::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], 1.0);
        match generate_pages(&config).unwrap_err() {
            GenerateError::InvalidConfig(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.code == ErrorCode::ZeroLikelihoodEnvelope));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_page_single_voice() {
        let mut config = small_config(5);
        config.voice_count = 1;
        config.page_count = 1;
        let result = generate_pages(&config).unwrap();
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages.pages[0].voice_count(), 1);
    }
}
