//! Config validation.
//!
//! Validation collects every problem instead of stopping at the first one, so
//! the CLI can report a broken config in a single pass.

use crate::config::{Breakpoint, ModePolicy, PagesConfig, SamplerConfig};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

/// Validates a pages config.
///
/// # Returns
/// A [`ValidationResult`] holding all errors and warnings found.
///
/// # Example
/// ```
/// use pages_spec::{validate_config, ErrorCode, PagesConfig};
///
/// let mut config = PagesConfig::default();
/// config.voice_count = 0;
/// let result = validate_config(&config);
/// assert!(result.has_error(ErrorCode::InvalidVoiceCount));
/// ```
pub fn validate_config(config: &PagesConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    if config.voice_count == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVoiceCount,
            "voice_count must be at least 1",
            "voice_count",
        ));
    }

    if config.page_count == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidPageCount,
            "page_count must be at least 1",
            "page_count",
        ));
    }

    if config.minimum_event_count > config.maximum_event_count {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvertedEventCountBounds,
            format!(
                "minimum_event_count ({}) exceeds maximum_event_count ({})",
                config.minimum_event_count, config.maximum_event_count
            ),
            "minimum_event_count",
        ));
    }

    let summed_maximum =
        u64::from(config.maximum_event_count).saturating_mul(config.voice_count as u64);
    if summed_maximum > u64::from(u32::MAX) {
        result.add_error(ValidationError::with_path(
            ErrorCode::EventCountOverflow,
            format!(
                "maximum_event_count ({}) times voice_count ({}) exceeds {}",
                config.maximum_event_count,
                config.voice_count,
                u32::MAX
            ),
            "maximum_event_count",
        ));
    }

    let range = config.segment_page_count_range;
    if range.start == 0 || range.start >= range.end {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSegmentRange,
            format!(
                "segment_page_count_range must satisfy 1 <= start < end, got [{}, {})",
                range.start, range.end
            ),
            "segment_page_count_range",
        ));
    } else if config.page_count > 0 && range.start > config.page_count {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::SegmentWiderThanScore,
            format!(
                "every segment ({}+ pages) is wider than the score ({} pages)",
                range.start, config.page_count
            ),
            "segment_page_count_range",
        ));
    }

    if !config.curve_shape.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCurveShape,
            format!("curve_shape must be finite, got {}", config.curve_shape),
            "curve_shape",
        ));
    }

    validate_sampler(
        &config.minimum_percentage_sampler,
        "minimum_percentage_sampler",
        &mut result,
    );
    validate_sampler(
        &config.maximum_percentage_sampler,
        "maximum_percentage_sampler",
        &mut result,
    );

    for (name, pair) in [
        ("short_durations", &config.short_durations),
        ("long_durations", &config.long_durations),
    ] {
        for (bound, sampler) in [("minimum", &pair.minimum), ("maximum", &pair.maximum)] {
            let path = format!("{}.{}", name, bound);
            validate_sampler(sampler, &path, &mut result);
            if sampler.offset.is_finite() && sampler.offset < 0.0 {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::NegativeDurationSupport,
                    format!("offset {} can produce negative durations", sampler.offset),
                    format!("{}.offset", path),
                ));
            }
        }
    }

    validate_mode_policy(&config.duration_mode, &mut result);

    if config.render.paper.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRenderSettings,
            "paper must not be empty",
            "render.paper",
        ));
    }
    if config.render.build_dir.as_os_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRenderSettings,
            "build_dir must not be empty",
            "render.build_dir",
        ));
    }

    result
}

/// Validates one weighted sampler.
///
/// Besides shape checks, the likelihood envelope must be positive over some
/// segment of non-zero width: the sampler keeps redrawing until a candidate is
/// accepted, and a likelihood that is only positive at isolated points (such
/// as a jump at the very end) is never hit.
pub fn validate_sampler(sampler: &SamplerConfig, path: &str, result: &mut ValidationResult) {
    let envelope_path = format!("{}.envelope", path);
    validate_envelope(&sampler.envelope, &envelope_path, result);

    if !sampler.offset.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOffset,
            format!("offset must be finite, got {}", sampler.offset),
            format!("{}.offset", path),
        ));
    }

    let values_valid = sampler
        .envelope
        .iter()
        .all(|p| p.value.is_finite() && p.value >= 0.0);
    if !values_valid {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelopeValue,
            "likelihood values must be finite and non-negative",
            envelope_path.clone(),
        ));
    } else if !has_positive_segment(&sampler.envelope) {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroLikelihoodEnvelope,
            "likelihood envelope is zero almost everywhere; sampling would never terminate",
            envelope_path,
        ));
    }
}

/// Returns true if some segment of positive width has a positive endpoint.
///
/// Interpolation is continuous within a segment, so such a segment is positive
/// on a sub-range of non-zero width.
fn has_positive_segment(points: &[Breakpoint]) -> bool {
    points
        .windows(2)
        .any(|w| w[0].position < w[1].position && (w[0].value > 0.0 || w[1].value > 0.0))
}

/// Validates breakpoint count, ordering, and finiteness of an envelope.
pub fn validate_envelope(points: &[Breakpoint], path: &str, result: &mut ValidationResult) {
    if points.len() < 2 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            format!("envelope needs at least 2 points, got {}", points.len()),
            path,
        ));
        return;
    }

    if points
        .iter()
        .any(|p| !p.position.is_finite() || !p.curve_shape.is_finite())
    {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            "envelope positions and curve shapes must be finite",
            path,
        ));
        return;
    }

    if points[0].position != 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            format!("envelope must start at position 0, got {}", points[0].position),
            path,
        ));
    }

    if points.windows(2).any(|w| w[1].position < w[0].position) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            "envelope positions must be ascending",
            path,
        ));
    }

    let span = points[points.len() - 1].position - points[0].position;
    if span <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            "envelope must span a positive range",
            path,
        ));
    }
}

fn validate_mode_policy(policy: &ModePolicy, result: &mut ValidationResult) {
    match policy {
        ModePolicy::AlwaysShort | ModePolicy::AlwaysLong => {}
        ModePolicy::Cycle { pattern } => {
            if pattern.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidModePolicy,
                    "cycle pattern must not be empty",
                    "duration_mode.pattern",
                ));
            }
        }
        ModePolicy::Random {
            short_probability, ..
        } => {
            if !(0.0..=1.0).contains(short_probability) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidModePolicy,
                    format!(
                        "short_probability must be in [0, 1], got {}",
                        short_probability
                    ),
                    "duration_mode.short_probability",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DurationMode, SegmentRange};

    #[test]
    fn test_default_config_is_valid() {
        let result = validate_config(&PagesConfig::default());
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut config = PagesConfig::default();
        config.voice_count = 0;
        config.page_count = 0;
        config.minimum_event_count = 6;
        config.segment_page_count_range = SegmentRange::new(3, 3);

        let result = validate_config(&config);
        assert!(result.has_error(ErrorCode::InvalidVoiceCount));
        assert!(result.has_error(ErrorCode::InvalidPageCount));
        assert!(result.has_error(ErrorCode::InvertedEventCountBounds));
        assert!(result.has_error(ErrorCode::InvalidSegmentRange));
    }

    #[test]
    fn test_summed_event_count_overflow_rejected() {
        let mut config = PagesConfig::default();
        config.voice_count = 2;
        config.page_count = 1;
        config.minimum_event_count = 3_000_000_000;
        config.maximum_event_count = 3_000_000_000;
        let result = validate_config(&config);
        assert!(result.has_error(ErrorCode::EventCountOverflow));

        config.voice_count = 1;
        assert!(!validate_config(&config).has_error(ErrorCode::EventCountOverflow));
    }

    #[test]
    fn test_zero_width_segments_rejected() {
        let mut config = PagesConfig::default();
        config.segment_page_count_range = SegmentRange::new(0, 3);
        assert!(validate_config(&config).has_error(ErrorCode::InvalidSegmentRange));
    }

    #[test]
    fn test_zero_likelihood_envelope_rejected() {
        let mut config = PagesConfig::default();
        config.minimum_percentage_sampler = SamplerConfig::from_points(&[(0.0, 0.0), (1.0, 0.0)], 0.0);
        let result = validate_config(&config);
        assert!(result.has_error(ErrorCode::ZeroLikelihoodEnvelope));
        assert_eq!(
            result.errors[0].path.as_deref(),
            Some("minimum_percentage_sampler.envelope")
        );
    }

    #[test]
    fn test_point_likelihood_envelopes_rejected() {
        let jump_at_end = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let jump_to_zero = [(0.0, 0.0), (0.0, 1.0), (0.0, 0.0), (1.0, 0.0)];
        for points in [&jump_at_end[..], &jump_to_zero[..]] {
            let mut config = PagesConfig::default();
            config.short_durations.minimum = SamplerConfig::from_points(points, 1.0);
            let result = validate_config(&config);
            assert!(result.has_error(ErrorCode::ZeroLikelihoodEnvelope), "{:?}", points);
            assert_eq!(
                result.errors[0].path.as_deref(),
                Some("short_durations.minimum.envelope")
            );
        }
    }

    #[test]
    fn test_segment_falling_to_zero_is_accepted() {
        let mut config = PagesConfig::default();
        config.short_durations.minimum =
            SamplerConfig::from_points(&[(0.0, 1.0), (1.0, 0.0), (4.0, 0.0)], 1.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_envelope_shape_errors() {
        let mut config = PagesConfig::default();
        config.short_durations.minimum = SamplerConfig::from_points(&[(0.0, 1.0)], 1.0);
        config.short_durations.maximum =
            SamplerConfig::from_points(&[(0.0, 1.0), (5.0, 1.0), (2.0, 1.0)], 10.0);
        config.long_durations.minimum = SamplerConfig::from_points(&[(1.0, 1.0), (2.0, 1.0)], 1.0);

        let result = validate_config(&config);
        let envelope_errors = result
            .errors
            .iter()
            .filter(|e| e.code == ErrorCode::InvalidEnvelope)
            .count();
        assert_eq!(envelope_errors, 3);
    }

    #[test]
    fn test_negative_likelihood_rejected() {
        let mut config = PagesConfig::default();
        config.maximum_percentage_sampler =
            SamplerConfig::from_points(&[(0.0, -0.5), (1.0, 0.5)], 0.0);
        assert!(validate_config(&config).has_error(ErrorCode::InvalidEnvelopeValue));
    }

    #[test]
    fn test_mode_policy_checks() {
        let mut config = PagesConfig::default();
        config.duration_mode = ModePolicy::Cycle { pattern: vec![] };
        assert!(validate_config(&config).has_error(ErrorCode::InvalidModePolicy));

        config.duration_mode = ModePolicy::Random {
            short_probability: 1.5,
            seed: None,
        };
        assert!(validate_config(&config).has_error(ErrorCode::InvalidModePolicy));

        config.duration_mode = ModePolicy::Cycle {
            pattern: vec![DurationMode::Long],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_warnings_do_not_fail_validation() {
        let mut config = PagesConfig::default();
        config.page_count = 2;
        config.short_durations.minimum.offset = -3.0;

        let result = validate_config(&config);
        assert!(result.is_ok());
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::SegmentWiderThanScore));
        assert!(codes.contains(&WarningCode::NegativeDurationSupport));
    }
}
