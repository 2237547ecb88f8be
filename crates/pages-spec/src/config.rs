//! Generator configuration types.
//!
//! Every parameter of a pages run lives in [`PagesConfig`]. `Default` always
//! builds fresh values, so no sampler configuration is shared between runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One envelope breakpoint: a position, the value at that position, and the
/// curve shape of the segment that starts here.
///
/// Serialized as a `[position, value]` or `[position, value, curve_shape]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BreakpointRepr", into = "BreakpointRepr")]
pub struct Breakpoint {
    /// Position of the breakpoint (absolute, not normalized).
    pub position: f64,
    /// Envelope value at `position`.
    pub value: f64,
    /// Curve shape of the outgoing segment. 0 is linear; positive values start
    /// slowly and finish fast, negative values do the opposite.
    pub curve_shape: f64,
}

impl Breakpoint {
    /// Creates a linear breakpoint.
    pub fn new(position: f64, value: f64) -> Self {
        Self {
            position,
            value,
            curve_shape: 0.0,
        }
    }

    /// Creates a breakpoint with an explicit curve shape.
    pub fn curved(position: f64, value: f64, curve_shape: f64) -> Self {
        Self {
            position,
            value,
            curve_shape,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BreakpointRepr(f64, f64, #[serde(default)] f64);

impl From<BreakpointRepr> for Breakpoint {
    fn from(repr: BreakpointRepr) -> Self {
        Breakpoint::curved(repr.0, repr.1, repr.2)
    }
}

impl From<Breakpoint> for BreakpointRepr {
    fn from(point: Breakpoint) -> Self {
        BreakpointRepr(point.position, point.value, point.curve_shape)
    }
}

/// Configuration of one weighted random sampler.
///
/// The envelope is the likelihood shape over `[0, span]`; the sampler returns
/// `candidate + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerConfig {
    /// Likelihood envelope breakpoints.
    pub envelope: Vec<Breakpoint>,
    /// Constant added to every accepted candidate.
    #[serde(default)]
    pub offset: f64,
    /// Explicit seed. When absent, the seed is derived from the run seed and
    /// the sampler's component key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl SamplerConfig {
    /// Creates a sampler config from `(position, value)` pairs.
    pub fn from_points(points: &[(f64, f64)], offset: f64) -> Self {
        Self {
            envelope: points.iter().map(|&(p, v)| Breakpoint::new(p, v)).collect(),
            offset,
            seed: None,
        }
    }

    /// Sets an explicit seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The minimum- and maximum-duration samplers used for one duration mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DurationSamplerPair {
    /// Sampler for the lower bound of a duration range.
    pub minimum: SamplerConfig,
    /// Sampler for the upper bound of a duration range.
    pub maximum: SamplerConfig,
}

/// Inclusive-exclusive range of page counts a single envelope segment spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentRange {
    /// Smallest segment width (inclusive).
    pub start: usize,
    /// Largest segment width (exclusive).
    pub end: usize,
}

impl SegmentRange {
    /// Creates a new `[start, end)` range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Whether a page draws its durations from the short or the long samplers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// Use the short-duration samplers.
    #[default]
    Short,
    /// Use the long-duration samplers.
    Long,
}

impl DurationMode {
    /// Returns true for [`DurationMode::Short`].
    pub fn is_short(&self) -> bool {
        matches!(self, DurationMode::Short)
    }

    /// Returns the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationMode::Short => "short",
            DurationMode::Long => "long",
        }
    }
}

/// Policy deciding the duration mode of each page in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ModePolicy {
    /// Every page is short.
    #[default]
    AlwaysShort,
    /// Every page is long.
    AlwaysLong,
    /// Repeat the given pattern across pages.
    Cycle {
        /// Modes to repeat, starting at page 0.
        pattern: Vec<DurationMode>,
    },
    /// Each page is short with the given probability.
    Random {
        /// Probability in [0, 1] that a page is short.
        short_probability: f64,
        /// Explicit seed; derived from the run seed when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u32>,
    },
}

/// Settings for the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// LaTeX paper option (e.g. "a4paper").
    #[serde(default = "default_paper")]
    pub paper: String,
    /// Title printed on the cover and the score.
    #[serde(default = "default_title")]
    pub title: String,
    /// Directory receiving intermediate and final documents.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

fn default_paper() -> String {
    "a4paper".to_string()
}

fn default_title() -> String {
    "pages".to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("./builds")
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paper: default_paper(),
            title: default_title(),
            build_dir: default_build_dir(),
        }
    }
}

/// Complete configuration of a pages run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagesConfig {
    /// Run seed; per-component seeds are derived from it.
    pub seed: u32,
    /// Number of voices (players) per page.
    pub voice_count: usize,
    /// Number of pages to generate.
    pub page_count: usize,
    /// Smallest event count a single voice draws.
    pub minimum_event_count: u32,
    /// Largest event count a single voice draws (inclusive).
    pub maximum_event_count: u32,
    /// Widths of the alternating event-count envelope segments.
    pub segment_page_count_range: SegmentRange,
    /// Curve shape magnitude applied to envelope segments.
    pub curve_shape: f64,
    /// Percentage sampler for restrictive ("minima") segments.
    pub minimum_percentage_sampler: SamplerConfig,
    /// Percentage sampler for permissive ("maxima") segments.
    pub maximum_percentage_sampler: SamplerConfig,
    /// Duration samplers for short pages.
    pub short_durations: DurationSamplerPair,
    /// Duration samplers for long pages.
    pub long_durations: DurationSamplerPair,
    /// Short/long policy across pages.
    #[serde(default)]
    pub duration_mode: ModePolicy,
    /// Document rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

impl PagesConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the duration sampler pair used by `mode`.
    pub fn durations_for(&self, mode: DurationMode) -> &DurationSamplerPair {
        match mode {
            DurationMode::Short => &self.short_durations,
            DurationMode::Long => &self.long_durations,
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        let minimum_duration = [(0.0, 0.5), (4.0, 0.8), (12.0, 1.0), (14.0, 1.0), (18.0, 0.7)];
        let maximum_duration = [(0.0, 0.65), (10.0, 1.0), (30.0, 1.0), (35.0, 0.9), (60.0, 0.5)];
        let stretched = |points: &[(f64, f64)]| -> Vec<(f64, f64)> {
            points.iter().map(|&(p, v)| (p * 3.0, v)).collect()
        };

        Self {
            seed: 1000,
            voice_count: 4,
            page_count: 100,
            minimum_event_count: 0,
            maximum_event_count: 5,
            segment_page_count_range: SegmentRange::new(4, 7),
            curve_shape: 2.0,
            minimum_percentage_sampler: SamplerConfig::from_points(
                &[(0.0, 1.0), (0.2, 1.0), (0.5, 0.5), (1.0, 0.2)],
                0.0,
            ),
            maximum_percentage_sampler: SamplerConfig::from_points(
                &[(0.0, 0.4), (0.3, 0.95), (0.4, 0.7), (1.0, 0.35)],
                0.0,
            ),
            short_durations: DurationSamplerPair {
                minimum: SamplerConfig::from_points(&minimum_duration, 1.0),
                maximum: SamplerConfig::from_points(&maximum_duration, 10.0),
            },
            long_durations: DurationSamplerPair {
                minimum: SamplerConfig::from_points(&stretched(&minimum_duration), 10.0),
                maximum: SamplerConfig::from_points(&stretched(&maximum_duration), 30.0),
            },
            duration_mode: ModePolicy::AlwaysShort,
            render: RenderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_breakpoint_accepts_two_or_three_elements() {
        let points: Vec<Breakpoint> = serde_json::from_str("[[0, 1], [2, 3, -1.5]]").unwrap();
        assert_eq!(points[0], Breakpoint::new(0.0, 1.0));
        assert_eq!(points[1], Breakpoint::curved(2.0, 3.0, -1.5));
    }

    #[test]
    fn test_breakpoint_serializes_as_array() {
        let json = serde_json::to_string(&Breakpoint::curved(1.0, 2.0, 0.5)).unwrap();
        assert_eq!(json, "[1.0,2.0,0.5]");
    }

    #[test]
    fn test_default_config_roundtrip() {
        let config = PagesConfig::default();
        let json = config.to_json_pretty().unwrap();
        let parsed = PagesConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_mode_policy_tagged_representation() {
        let policy: ModePolicy =
            serde_json::from_str(r#"{"kind": "cycle", "pattern": ["short", "long"]}"#).unwrap();
        assert_eq!(
            policy,
            ModePolicy::Cycle {
                pattern: vec![DurationMode::Short, DurationMode::Long]
            }
        );

        let policy: ModePolicy = serde_json::from_str(r#"{"kind": "always_long"}"#).unwrap();
        assert_eq!(policy, ModePolicy::AlwaysLong);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut value = serde_json::to_value(PagesConfig::default()).unwrap();
        value["voices"] = serde_json::json!(3);
        assert!(serde_json::from_value::<PagesConfig>(value).is_err());
    }

    #[test]
    fn test_render_section_is_optional() {
        let mut value = serde_json::to_value(PagesConfig::default()).unwrap();
        value.as_object_mut().unwrap().remove("render");
        value.as_object_mut().unwrap().remove("duration_mode");
        let config: PagesConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.duration_mode, ModePolicy::AlwaysShort);
    }

    #[test]
    fn test_durations_for_mode() {
        let config = PagesConfig::default();
        assert_eq!(config.durations_for(DurationMode::Short).minimum.offset, 1.0);
        assert_eq!(config.durations_for(DurationMode::Long).minimum.offset, 10.0);
    }
}
