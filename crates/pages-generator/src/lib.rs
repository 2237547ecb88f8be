//! Pages Generator - Deterministic Score Page Generation
//!
//! This crate turns a [`PagesConfig`](pages_spec::PagesConfig) into a
//! [`PageSequence`](pages_spec::PageSequence): for every page and every voice it
//! decides how many events happen and over which duration range.
//!
//! # Pipeline
//!
//! 1. [`event_count_envelope`] builds an envelope of the aggregate maximum event
//!    count, alternating restrictive and permissive stretches of random width.
//! 2. [`event_count`] derives a minimum envelope from it and samples per-voice
//!    event counts whose sum stays inside both envelopes, repairing the draw when
//!    rejection sampling stalls.
//! 3. [`duration`] averages weighted random duration samples into a quantized
//!    `(minimum, maximum)` range per voice.
//! 4. [`page_sequence`] assembles pages and applies the time-range consistency
//!    fix-up.
//!
//! # Determinism
//!
//! Every sampler owns its own PCG32 stream, seeded either explicitly or from the
//! run seed through BLAKE3 component derivation. Given the same config, the
//! output is identical, and so is its hash.
//!
//! # Example
//!
//! ```
//! use pages_generator::generate_pages;
//! use pages_spec::PagesConfig;
//!
//! let mut config = PagesConfig::default();
//! config.page_count = 8;
//! let result = generate_pages(&config).unwrap();
//! assert_eq!(result.pages.len(), 8);
//! ```

pub mod duration;
pub mod envelope;
pub mod error;
pub mod event_count;
pub mod event_count_envelope;
pub mod generate;
pub mod mode;
pub mod page_sequence;
pub mod rng;
pub mod sampler;

pub use duration::{quantize, DurationRangeSampler, DurationSamplers};
pub use envelope::Envelope;
pub use error::GenerateError;
pub use event_count::{BoundViolation, EventCountBounds, EventCountDraw, EventCountSampler};
pub use event_count_envelope::{EventCountEnvelopeBuilder, EventCountEnvelopeSettings};
pub use generate::{generate_pages, GenerateResult};
pub use mode::ModeSequence;
pub use page_sequence::{fix_time_range_inconsistencies, PageSequenceBuilder};
pub use sampler::WeightedRandomSampler;

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier for reports.
pub const BACKEND_ID: &str = "pages-generator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_backend_id() {
        assert_eq!(BACKEND_ID, "pages-generator");
    }
}
