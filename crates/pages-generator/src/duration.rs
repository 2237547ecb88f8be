//! Duration ranges of event sequences.

use pages_spec::{DurationMode, DurationRange, PagesConfig, DURATION_GRID};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::GenerateError;
use crate::rng::{self, create_component_rng};
use crate::sampler::WeightedRandomSampler;

/// Rounds `value` to the nearest multiple of [`DURATION_GRID`], ties to even.
pub fn quantize(value: f64) -> f64 {
    DURATION_GRID * (value / DURATION_GRID).round_ties_even()
}

/// The minimum- and maximum-duration samplers of one duration mode.
#[derive(Debug, Clone)]
pub struct DurationSamplers {
    /// Draws candidate lower bounds.
    pub minimum: WeightedRandomSampler,
    /// Draws candidate upper bounds.
    pub maximum: WeightedRandomSampler,
}

impl DurationSamplers {
    /// Creates a pair of samplers.
    pub fn new(minimum: WeightedRandomSampler, maximum: WeightedRandomSampler) -> Self {
        Self { minimum, maximum }
    }
}

/// Derives the duration range of a voice from its event count.
#[derive(Debug, Clone)]
pub struct DurationRangeSampler {
    short: DurationSamplers,
    long: DurationSamplers,
    rng: Pcg32,
}

impl DurationRangeSampler {
    /// Creates a sampler.
    ///
    /// `rng` only draws the fabricated sample count of resting voices.
    pub fn new(short: DurationSamplers, long: DurationSamplers, rng: Pcg32) -> Self {
        Self { short, long, rng }
    }

    /// Creates a sampler with all streams seeded from `config`.
    pub fn from_config(config: &PagesConfig) -> Result<Self, GenerateError> {
        let short = DurationSamplers::new(
            WeightedRandomSampler::from_config(
                &config.short_durations.minimum,
                config.seed,
                rng::SHORT_MINIMUM_DURATION,
            )?,
            WeightedRandomSampler::from_config(
                &config.short_durations.maximum,
                config.seed,
                rng::SHORT_MAXIMUM_DURATION,
            )?,
        );
        let long = DurationSamplers::new(
            WeightedRandomSampler::from_config(
                &config.long_durations.minimum,
                config.seed,
                rng::LONG_MINIMUM_DURATION,
            )?,
            WeightedRandomSampler::from_config(
                &config.long_durations.maximum,
                config.seed,
                rng::LONG_MAXIMUM_DURATION,
            )?,
        );
        Ok(Self::new(
            short,
            long,
            create_component_rng(None, config.seed, rng::REST_SAMPLE_COUNTS),
        ))
    }

    /// Computes the duration range of a voice playing `event_count` events.
    ///
    /// Both bounds are averages of one sample per event, quantized to the grid.
    /// A resting voice still samples (once or twice) so it gets a sensible
    /// lower bound, but its upper bound is infinite.
    pub fn sample(&mut self, event_count: u32, mode: DurationMode) -> DurationRange {
        let is_rest = event_count == 0;
        let sample_count = if is_rest {
            self.rng.gen_range(1..=2)
        } else {
            event_count
        };

        let samplers = match mode {
            DurationMode::Short => &mut self.short,
            DurationMode::Long => &mut self.long,
        };

        let mut minimum_sum = 0.0;
        let mut maximum_sum = 0.0;
        for _ in 0..sample_count {
            minimum_sum += samplers.minimum.sample();
            maximum_sum += samplers.maximum.sample();
        }
        let samples = f64::from(sample_count);
        let mut minimum = quantize(minimum_sum / samples);
        let mut maximum = quantize(maximum_sum / samples);

        if !is_rest && minimum == 0.0 {
            minimum = DURATION_GRID;
        }
        while maximum <= minimum {
            maximum = minimum + DURATION_GRID;
        }
        if is_rest {
            maximum = f64::INFINITY;
        }

        DurationRange::new(minimum, maximum)
    }
}
