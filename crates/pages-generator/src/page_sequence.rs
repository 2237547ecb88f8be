//! Assembly of pages from event counts and duration ranges.

use pages_spec::{DurationMode, EventSequence, Page, PageSequence};

use crate::duration::DurationRangeSampler;
use crate::error::GenerateError;
use crate::event_count::EventCountSampler;

/// Builds the page sequence of a score.
#[derive(Debug, Clone)]
pub struct PageSequenceBuilder {
    event_counts: EventCountSampler,
    durations: DurationRangeSampler,
}

impl PageSequenceBuilder {
    /// Creates a builder from its two samplers.
    pub fn new(event_counts: EventCountSampler, durations: DurationRangeSampler) -> Self {
        Self {
            event_counts,
            durations,
        }
    }

    /// Builds `page_count` pages of `voice_count` voices.
    ///
    /// `modes` yields the duration mode of each page in order; pages past its
    /// end are short.
    pub fn build<I>(
        &mut self,
        voice_count: usize,
        page_count: usize,
        modes: I,
    ) -> Result<PageSequence, GenerateError>
    where
        I: IntoIterator<Item = DurationMode>,
    {
        let mut modes = modes.into_iter();
        let mut pages = Vec::with_capacity(page_count);

        for page_number in 0..page_count {
            let draw = self
                .event_counts
                .sample(voice_count, page_number, page_count)?;
            let mode = modes.next().unwrap_or_default();

            let mut page = Page::new(page_number);
            for (player_index, &event_count) in draw.counts.iter().enumerate() {
                let duration_range = self.durations.sample(event_count, mode);
                page.event_sequences.push(EventSequence {
                    player_index,
                    event_count,
                    duration_range,
                    is_short: mode.is_short(),
                });
            }
            fix_time_range_inconsistencies(&mut page);

            log::debug!(
                "page {}: {} mode, counts {:?} within [{}, {}]",
                page_number,
                mode.as_str(),
                draw.counts,
                draw.bounds.minimum,
                draw.bounds.maximum
            );
            pages.push(page);
        }

        Ok(PageSequence { pages })
    }
}

/// Zeroes the lower duration bound of resting voices that would otherwise
/// appear to start late.
///
/// Let `latest` be the largest lower bound on the page. A resting voice whose
/// lower bound is at most `latest` starts at 0. When every voice rests, only
/// bounds strictly below `latest` are zeroed, so one placeholder keeps its
/// start. Voices with events are never touched.
pub fn fix_time_range_inconsistencies(page: &mut Page) {
    let latest = page
        .event_sequences
        .iter()
        .map(|e| e.duration_range.minimum)
        .fold(f64::NEG_INFINITY, f64::max);
    let all_rest = page.is_silent();

    // Rest-only: a voice with events keeps its lower bound whatever `latest` is.
    for sequence in page.event_sequences.iter_mut().filter(|e| e.is_rest()) {
        let start = sequence.duration_range.minimum;
        let zero = if all_rest {
            start < latest
        } else {
            start <= latest
        };
        if zero {
            sequence.duration_range.minimum = 0.0;
        }
    }
}
