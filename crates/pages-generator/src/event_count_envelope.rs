//! Aggregate maximum event-count envelope.
//!
//! The envelope alternates between permissive ("maxima") and restrictive
//! ("minima") stretches of randomized width, so the density of the score rises
//! and falls across its pages.

use pages_spec::{Breakpoint, PagesConfig, SegmentRange};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::envelope::Envelope;
use crate::error::GenerateError;
use crate::rng::{self, create_component_rng};
use crate::sampler::WeightedRandomSampler;

/// Position at which the minima envelope gives the value of the first page.
const START_POSITION: f64 = 0.2;

/// Parameters of the envelope builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventCountEnvelopeSettings {
    /// Curve-shape magnitude applied to every segment.
    pub curve_shape: f64,
    /// Per-voice lower event-count bound.
    pub minimum_event_count: u32,
    /// Per-voice upper event-count bound.
    pub maximum_event_count: u32,
    /// Segment widths in pages, start inclusive, end exclusive.
    pub segment_page_count_range: SegmentRange,
}

impl EventCountEnvelopeSettings {
    /// Takes the builder parameters from a config.
    pub fn from_config(config: &PagesConfig) -> Self {
        Self {
            curve_shape: config.curve_shape,
            minimum_event_count: config.minimum_event_count,
            maximum_event_count: config.maximum_event_count,
            segment_page_count_range: config.segment_page_count_range,
        }
    }
}

/// Builds the envelope of the aggregate maximum event count per page.
#[derive(Debug, Clone)]
pub struct EventCountEnvelopeBuilder {
    settings: EventCountEnvelopeSettings,
    minimum_percentage: WeightedRandomSampler,
    maximum_percentage: WeightedRandomSampler,
    rng: Pcg32,
}

impl EventCountEnvelopeBuilder {
    /// Creates a builder.
    ///
    /// `minimum_percentage` picks positions on the restrictive branch,
    /// `maximum_percentage` on the permissive one, and `rng` draws segment
    /// widths.
    pub fn new(
        settings: EventCountEnvelopeSettings,
        minimum_percentage: WeightedRandomSampler,
        maximum_percentage: WeightedRandomSampler,
        rng: Pcg32,
    ) -> Self {
        Self {
            settings,
            minimum_percentage,
            maximum_percentage,
            rng,
        }
    }

    /// Creates a builder with samplers and streams seeded from `config`.
    pub fn from_config(config: &PagesConfig) -> Result<Self, GenerateError> {
        let minimum_percentage = WeightedRandomSampler::from_config(
            &config.minimum_percentage_sampler,
            config.seed,
            rng::MINIMUM_PERCENTAGE,
        )?;
        let maximum_percentage = WeightedRandomSampler::from_config(
            &config.maximum_percentage_sampler,
            config.seed,
            rng::MAXIMUM_PERCENTAGE,
        )?;
        Ok(Self::new(
            EventCountEnvelopeSettings::from_config(config),
            minimum_percentage,
            maximum_percentage,
            create_component_rng(None, config.seed, rng::SEGMENT_WIDTHS),
        ))
    }

    /// Produces breakpoints indexed by page, from page 0 to `page_count`.
    pub fn breakpoints(
        &mut self,
        voice_count: usize,
        page_count: usize,
    ) -> Result<Vec<Breakpoint>, GenerateError> {
        if page_count == 0 {
            return Err(GenerateError::invalid_parameter(
                "page_count must be at least 1",
            ));
        }
        let SegmentRange { start, end } = self.settings.segment_page_count_range;
        if start == 0 || start >= end {
            return Err(GenerateError::invalid_parameter(format!(
                "segment page count range [{}, {}) must hold positive widths",
                start, end
            )));
        }

        let voices = voice_count as f64;
        let summed_minimum = f64::from(self.settings.minimum_event_count) * voices;
        let summed_maximum = f64::from(self.settings.maximum_event_count) * voices;
        let center = (summed_minimum + summed_maximum) / 2.0;

        let minima = Envelope::linear(&[(0.0, summed_minimum), (1.0, center)])?;
        let maxima = Envelope::linear(&[(0.0, center), (1.0, summed_maximum)])?;

        let mut points = vec![Breakpoint::new(
            0.0,
            minima.value_at(START_POSITION).round_ties_even(),
        )];

        let mut on_maxima = true;
        let mut page_index = 0;
        while page_index < page_count {
            let (value, curve_shape) = if on_maxima {
                // Leave a permissive stretch quickly.
                let percentage = self.maximum_percentage.sample();
                (maxima.value_at(percentage), -self.settings.curve_shape)
            } else {
                // Leave a restrictive stretch slowly.
                let percentage = self.minimum_percentage.sample();
                (minima.value_at(percentage), self.settings.curve_shape)
            };
            on_maxima = !on_maxima;

            page_index = (page_index + self.rng.gen_range(start..end)).min(page_count);
            points.push(Breakpoint::curved(
                page_index as f64,
                value.round_ties_even(),
                curve_shape,
            ));
        }

        Ok(points)
    }

    /// Builds the envelope normalized to positions in `[0, 1]`.
    pub fn build(&mut self, voice_count: usize, page_count: usize) -> Result<Envelope, GenerateError> {
        let points = self.breakpoints(voice_count, page_count)?;
        log::debug!(
            "aggregate maximum envelope for {} voices over {} pages has {} breakpoints",
            voice_count,
            page_count,
            points.len()
        );
        Ok(Envelope::new(points)?.with_duration(1.0))
    }
}
