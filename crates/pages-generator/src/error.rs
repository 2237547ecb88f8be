//! Error types for page generation.

use pages_spec::{BackendError, ValidationError};
use thiserror::Error;

/// Error type for page generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The config failed validation.
    #[error("invalid config: {}", format_validation_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// Invalid parameter value passed to a generator component.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Envelope breakpoints are unusable.
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// A drawn event-count vector violates both aggregate bounds at once.
    ///
    /// This cannot be repaired by nudging single voices and means the
    /// parameters contradict each other.
    #[error(
        "A mix of bad parameters has been passed. Event counts: {event_counts:?}; \
         too many events: {too_many_events}; too few events: {too_few_events}; \
         minimum_event_count = {minimum_event_count}; maximum_event_count = {maximum_event_count}"
    )]
    BadParameters {
        event_counts: Vec<u32>,
        too_few_events: bool,
        too_many_events: bool,
        minimum_event_count: f64,
        maximum_event_count: f64,
    },

    /// Hashing the generated pages failed.
    #[error("Failed to hash generated pages: {0}")]
    Hash(#[from] pages_spec::SpecError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GenerateError {
    /// Creates a new invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Creates a new invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope(message.into())
    }
}

impl BackendError for GenerateError {
    fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidConfig(_) => "GENERATE_001",
            GenerateError::InvalidParameter(_) => "GENERATE_002",
            GenerateError::InvalidEnvelope(_) => "GENERATE_003",
            GenerateError::BadParameters { .. } => "GENERATE_004",
            GenerateError::Hash(_) => "GENERATE_005",
        }
    }

    fn category(&self) -> &'static str {
        "generate"
    }
}
