//! Generated score data model.
//!
//! A [`PageSequence`] is the only thing the generator hands to renderers. Pages
//! are built once, receive the time-range consistency fix-up, and are then only
//! read, so they can be shared between concurrent render workers.

use serde::{Deserialize, Serialize};

/// Grid step every computed duration bound is quantized to.
pub const DURATION_GRID: f64 = 5.0;

/// Range of durations an event sequence may span.
///
/// Invariant: `maximum > minimum`. A `maximum` of `+inf` marks a voice with no
/// events; it is serialized as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    /// Lower duration bound in seconds.
    pub minimum: f64,
    /// Upper duration bound in seconds, possibly infinite.
    #[serde(with = "infinite_as_null")]
    pub maximum: f64,
}

impl DurationRange {
    /// Creates a new range.
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    /// Returns true if the upper bound is unbounded.
    pub fn is_open_ended(&self) -> bool {
        self.maximum.is_infinite()
    }
}

mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// What one voice plays on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSequence {
    /// 0-based voice index.
    pub player_index: usize,
    /// Number of events the voice plays on this page.
    pub event_count: u32,
    /// Duration range of the whole sequence.
    pub duration_range: DurationRange,
    /// Whether the page used the short-duration samplers.
    pub is_short: bool,
}

impl EventSequence {
    /// Returns true if the voice rests for the whole page.
    pub fn is_rest(&self) -> bool {
        self.event_count == 0
    }

    /// Nominal duration of the sequence (its upper bound).
    pub fn duration(&self) -> f64 {
        self.duration_range.maximum
    }
}

/// One page of the score: an event sequence per voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 0-based page number.
    pub page_number: usize,
    /// Event sequences ordered by voice.
    pub event_sequences: Vec<EventSequence>,
}

impl Page {
    /// Creates an empty page.
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            event_sequences: Vec::new(),
        }
    }

    /// Number of voices on the page.
    pub fn voice_count(&self) -> usize {
        self.event_sequences.len()
    }

    /// Sum of event counts across voices.
    pub fn aggregate_event_count(&self) -> u64 {
        self.event_sequences
            .iter()
            .map(|e| u64::from(e.event_count))
            .sum()
    }

    /// Returns true if every voice rests.
    pub fn is_silent(&self) -> bool {
        self.event_sequences.iter().all(EventSequence::is_rest)
    }

    /// Iterates over the event sequences in voice order.
    pub fn iter(&self) -> std::slice::Iter<'_, EventSequence> {
        self.event_sequences.iter()
    }
}

/// Ordered pages of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PageSequence {
    /// Pages in page-number order.
    pub pages: Vec<Page>,
}

impl PageSequence {
    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if there are no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Voice count of the score, taken from the first page.
    pub fn voice_count(&self) -> usize {
        self.pages.first().map(Page::voice_count).unwrap_or(0)
    }

    /// Iterates over the pages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Parses a page sequence from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the page sequence to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
