//! Per-voice event counts.
//!
//! Each page gets an aggregate admissible range from two envelopes. Voices draw
//! their counts independently; when no draw lands inside the range within
//! [`MAX_ATTEMPTS`], the last draw is nudged one event at a time until the
//! violated bound holds.

use pages_spec::Breakpoint;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::envelope::Envelope;
use crate::error::GenerateError;

/// Number of full draws before falling back to repair.
pub const MAX_ATTEMPTS: usize = 1000;

/// Ratio between the aggregate minimum and the aggregate maximum envelope.
pub const MINIMUM_ENVELOPE_RATIO: f64 = 0.35;

/// Admissible range of the aggregate event count of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventCountBounds {
    /// Smallest admissible sum.
    pub minimum: f64,
    /// Largest admissible sum.
    pub maximum: f64,
}

impl EventCountBounds {
    /// Creates bounds from raw envelope values.
    ///
    /// The minimum is clamped to 0 and the maximum raised in steps of 1 until it
    /// exceeds the minimum.
    pub fn from_raw(minimum: f64, maximum: f64) -> Self {
        let minimum = minimum.max(0.0);
        let mut maximum = maximum;
        while maximum <= minimum {
            maximum += 1.0;
        }
        Self { minimum, maximum }
    }

    /// Returns true if `sum` lies in `[minimum, maximum]`.
    pub fn contains(&self, sum: u32) -> bool {
        let sum = f64::from(sum);
        sum >= self.minimum && sum <= self.maximum
    }
}

/// Bound a drawn count vector failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundViolation {
    /// The sum is below the minimum.
    TooFew,
    /// The sum is above the maximum.
    TooMany,
}

/// Event counts of one page together with how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCountDraw {
    /// One count per voice.
    pub counts: Vec<u32>,
    /// Bounds the counts were drawn against.
    pub bounds: EventCountBounds,
    /// The bound that had to be repaired, if rejection sampling stalled.
    pub repaired: Option<BoundViolation>,
}

impl EventCountDraw {
    /// Sum of the counts.
    pub fn sum(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Samples per-voice event counts page by page.
#[derive(Debug, Clone)]
pub struct EventCountSampler {
    minimum_event_count: u32,
    maximum_event_count: u32,
    minimum_envelope: Envelope,
    maximum_envelope: Envelope,
    rng: Pcg32,
}

impl EventCountSampler {
    /// Creates a sampler.
    ///
    /// `maximum_envelope` is the normalized aggregate maximum envelope; the
    /// aggregate minimum envelope is derived from it.
    pub fn new(
        minimum_event_count: u32,
        maximum_event_count: u32,
        maximum_envelope: Envelope,
        rng: Pcg32,
    ) -> Result<Self, GenerateError> {
        if minimum_event_count > maximum_event_count {
            return Err(GenerateError::invalid_parameter(format!(
                "minimum event count {} exceeds maximum event count {}",
                minimum_event_count, maximum_event_count
            )));
        }
        let minimum_envelope = derive_minimum_envelope(&maximum_envelope)?;
        Ok(Self {
            minimum_event_count,
            maximum_event_count,
            minimum_envelope,
            maximum_envelope,
            rng,
        })
    }

    /// The aggregate minimum envelope.
    pub fn minimum_envelope(&self) -> &Envelope {
        &self.minimum_envelope
    }

    /// The aggregate maximum envelope.
    pub fn maximum_envelope(&self) -> &Envelope {
        &self.maximum_envelope
    }

    /// Aggregate bounds of page `page_index` out of `page_count`.
    pub fn bounds(&self, page_index: usize, page_count: usize) -> EventCountBounds {
        let position = page_index as f64 / page_count as f64;
        EventCountBounds::from_raw(
            self.minimum_envelope.value_at(position),
            self.maximum_envelope.value_at(position),
        )
    }

    /// Draws the event counts of one page.
    pub fn sample(
        &mut self,
        voice_count: usize,
        page_index: usize,
        page_count: usize,
    ) -> Result<EventCountDraw, GenerateError> {
        if voice_count == 0 {
            return Err(GenerateError::invalid_parameter(
                "voice_count must be at least 1",
            ));
        }
        if page_count == 0 {
            return Err(GenerateError::invalid_parameter(
                "page_count must be at least 1",
            ));
        }
        let summed_maximum =
            u64::from(self.maximum_event_count).saturating_mul(voice_count as u64);
        if summed_maximum > u64::from(u32::MAX) {
            return Err(GenerateError::invalid_parameter(format!(
                "{} voices of up to {} events overflow the page event count",
                voice_count, self.maximum_event_count
            )));
        }

        let bounds = self.bounds(page_index, page_count);
        let mut counts = Vec::new();
        for _ in 0..MAX_ATTEMPTS {
            counts = self.draw(voice_count);
            if bounds.contains(counts.iter().sum()) {
                return Ok(EventCountDraw {
                    counts,
                    bounds,
                    repaired: None,
                });
            }
        }

        log::warn!(
            "page {}: no event counts within [{}, {}] after {} attempts, repairing {:?}",
            page_index,
            bounds.minimum,
            bounds.maximum,
            MAX_ATTEMPTS,
            counts
        );
        let (counts, violation) = self.repair(counts, &bounds)?;
        Ok(EventCountDraw {
            counts,
            bounds,
            repaired: violation,
        })
    }

    /// Repairs a count vector that misses `bounds`.
    ///
    /// A random voice gains one event (too few) or loses one if it has any (too
    /// many) until the violated bound holds. The other bound is not rechecked.
    /// A vector that violates both bounds means the parameters contradict each
    /// other and is reported as [`GenerateError::BadParameters`].
    pub fn repair(
        &mut self,
        mut counts: Vec<u32>,
        bounds: &EventCountBounds,
    ) -> Result<(Vec<u32>, Option<BoundViolation>), GenerateError> {
        let sum = total(&counts);
        let too_few_events = sum < bounds.minimum;
        let too_many_events = sum > bounds.maximum;

        let violation = match (too_few_events, too_many_events) {
            (true, true) => {
                return Err(GenerateError::BadParameters {
                    event_counts: counts,
                    too_few_events,
                    too_many_events,
                    minimum_event_count: bounds.minimum,
                    maximum_event_count: bounds.maximum,
                })
            }
            (true, false) => BoundViolation::TooFew,
            (false, true) => BoundViolation::TooMany,
            (false, false) => return Ok((counts, None)),
        };
        if counts.is_empty() {
            return Err(GenerateError::invalid_parameter(
                "cannot repair an empty event count vector",
            ));
        }

        let voice_count = counts.len();
        match violation {
            BoundViolation::TooFew => {
                while total(&counts) < bounds.minimum {
                    let voice = self.rng.gen_range(0..voice_count);
                    counts[voice] = counts[voice].saturating_add(1);
                }
            }
            BoundViolation::TooMany => {
                while total(&counts) > bounds.maximum {
                    let voice = self.rng.gen_range(0..voice_count);
                    if let Some(lowered) = counts[voice].checked_sub(1) {
                        counts[voice] = lowered;
                    }
                }
            }
        }

        log::warn!("repaired {:?} event counts to {:?}", violation, counts);
        Ok((counts, Some(violation)))
    }

    fn draw(&mut self, voice_count: usize) -> Vec<u32> {
        (0..voice_count)
            .map(|_| {
                self.rng
                    .gen_range(self.minimum_event_count..=self.maximum_event_count)
            })
            .collect()
    }
}

fn total(counts: &[u32]) -> f64 {
    counts.iter().map(|&c| f64::from(c)).sum()
}

/// Derives the aggregate minimum envelope from the aggregate maximum one.
///
/// Each value is scaled by [`MINIMUM_ENVELOPE_RATIO`] and truncated, kept at or
/// above 0, and lowered by one when it would equal the unscaled value. Positions
/// and curve shapes carry over.
pub fn derive_minimum_envelope(maximum: &Envelope) -> Result<Envelope, GenerateError> {
    let points = maximum
        .points()
        .iter()
        .map(|p| {
            let mut value = (p.value * MINIMUM_ENVELOPE_RATIO).trunc().max(0.0);
            if value == p.value {
                value -= 1.0;
            }
            Breakpoint::curved(p.position, value, p.curve_shape)
        })
        .collect();
    Envelope::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;

    fn flat(value: f64) -> Envelope {
        Envelope::linear(&[(0.0, value), (1.0, value)]).unwrap()
    }

    #[test]
    fn test_minimum_envelope_derivation() {
        let maximum = Envelope::new(vec![
            Breakpoint::new(0.0, 10.0),
            Breakpoint::curved(0.5, 0.0, -2.0),
            Breakpoint::curved(1.0, 3.0, 2.0),
        ])
        .unwrap();
        let minimum = derive_minimum_envelope(&maximum).unwrap();
        let values: Vec<(f64, f64)> = minimum
            .points()
            .iter()
            .map(|p| (p.value, p.curve_shape))
            .collect();
        assert_eq!(values, vec![(3.0, 0.0), (-1.0, -2.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_bounds_are_never_empty() {
        assert_eq!(
            EventCountBounds::from_raw(-1.0, 0.0),
            EventCountBounds {
                minimum: 0.0,
                maximum: 1.0
            }
        );
        assert_eq!(EventCountBounds::from_raw(3.0, 3.0).maximum, 4.0);
        assert_eq!(EventCountBounds::from_raw(2.0, 7.5).maximum, 7.5);
    }

    #[test]
    fn test_sums_within_bounds() {
        let envelope = Envelope::linear(&[(0.0, 4.0), (0.5, 18.0), (1.0, 9.0)]).unwrap();
        let mut sampler = EventCountSampler::new(0, 5, envelope, create_rng(8)).unwrap();
        for page in 0..50 {
            let draw = sampler.sample(4, page, 50).unwrap();
            assert_eq!(draw.counts.len(), 4);
            assert!(draw.counts.iter().all(|&c| c <= 5));
            if draw.repaired.is_none() {
                assert!(draw.bounds.contains(draw.sum()));
            }
        }
    }

    #[test]
    fn test_repair_adds_events_until_minimum() {
        // Every voice draws 0, but the page needs at least 3 events.
        let mut sampler = EventCountSampler::new(0, 0, flat(10.0), create_rng(1)).unwrap();
        let draw = sampler.sample(4, 0, 10).unwrap();
        assert_eq!(draw.repaired, Some(BoundViolation::TooFew));
        assert_eq!(draw.sum(), 3);
    }

    #[test]
    fn test_repair_removes_events_until_maximum() {
        // Every voice draws 5, but the page allows at most 4 events.
        let mut sampler = EventCountSampler::new(5, 5, flat(4.0), create_rng(1)).unwrap();
        let draw = sampler.sample(4, 3, 10).unwrap();
        assert_eq!(draw.repaired, Some(BoundViolation::TooMany));
        assert_eq!(draw.sum(), 4);
    }

    #[test]
    fn test_repair_to_zero_never_underflows() {
        let mut sampler = EventCountSampler::new(0, 0, flat(1.0), create_rng(2)).unwrap();
        let bounds = EventCountBounds {
            minimum: 0.0,
            maximum: 0.0,
        };
        let (counts, violation) = sampler.repair(vec![0, 3, 0, 1], &bounds).unwrap();
        assert_eq!(counts, vec![0, 0, 0, 0]);
        assert_eq!(violation, Some(BoundViolation::TooMany));
    }

    #[test]
    fn test_contradicting_bounds_are_fatal() {
        let mut sampler = EventCountSampler::new(0, 5, flat(10.0), create_rng(2)).unwrap();
        let bounds = EventCountBounds {
            minimum: 5.0,
            maximum: 2.0,
        };
        let err = sampler.repair(vec![1, 2], &bounds).unwrap_err();
        match err {
            GenerateError::BadParameters {
                event_counts,
                too_few_events,
                too_many_events,
                ..
            } => {
                assert_eq!(event_counts, vec![1, 2]);
                assert!(too_few_events && too_many_events);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_satisfied_counts_are_left_alone() {
        let mut sampler = EventCountSampler::new(0, 5, flat(10.0), create_rng(2)).unwrap();
        let bounds = EventCountBounds {
            minimum: 1.0,
            maximum: 5.0,
        };
        assert_eq!(
            sampler.repair(vec![1, 2], &bounds).unwrap(),
            (vec![1, 2], None)
        );
    }

    #[test]
    fn test_overflowing_page_sum_is_rejected() {
        let mut sampler =
            EventCountSampler::new(3_000_000_000, 3_000_000_000, flat(3e9), create_rng(0))
                .unwrap();
        let err = sampler.sample(2, 0, 1).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidParameter(_)));
        assert_eq!(sampler.sample(1, 0, 1).unwrap().counts, vec![3_000_000_000]);
    }

    #[test]
    fn test_rejects_inverted_per_voice_bounds() {
        assert!(EventCountSampler::new(6, 5, flat(1.0), create_rng(0)).is_err());
    }

    #[test]
    fn test_rejects_zero_voices() {
        let mut sampler = EventCountSampler::new(0, 5, flat(10.0), create_rng(2)).unwrap();
        assert!(sampler.sample(0, 0, 10).is_err());
    }
}
