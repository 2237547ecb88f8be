//! Error types for config validation and processing.

use thiserror::Error;

/// Error codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Score shape errors (E001-E006)
    /// E001: voice_count must be at least 1
    InvalidVoiceCount,
    /// E002: page_count must be at least 1
    InvalidPageCount,
    /// E003: minimum_event_count exceeds maximum_event_count
    InvertedEventCountBounds,
    /// E004: segment_page_count_range is empty or starts at zero
    InvalidSegmentRange,
    /// E005: curve_shape is not finite
    InvalidCurveShape,
    /// E006: maximum_event_count * voice_count does not fit in a u32
    EventCountOverflow,

    // Sampler errors (E010-E013)
    /// E010: Envelope has too few points, unordered or non-finite positions
    InvalidEnvelope,
    /// E011: Likelihood envelope is zero everywhere (the sampler would never return)
    ZeroLikelihoodEnvelope,
    /// E012: Sampler offset is not finite
    InvalidOffset,
    /// E013: Envelope value is negative or not finite
    InvalidEnvelopeValue,

    // Policy and render errors (E020-E021)
    /// E020: Duration mode policy is malformed
    InvalidModePolicy,
    /// E021: Render settings are malformed
    InvalidRenderSettings,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVoiceCount => "E001",
            ErrorCode::InvalidPageCount => "E002",
            ErrorCode::InvertedEventCountBounds => "E003",
            ErrorCode::InvalidSegmentRange => "E004",
            ErrorCode::InvalidCurveShape => "E005",
            ErrorCode::EventCountOverflow => "E006",
            ErrorCode::InvalidEnvelope => "E010",
            ErrorCode::ZeroLikelihoodEnvelope => "E011",
            ErrorCode::InvalidOffset => "E012",
            ErrorCode::InvalidEnvelopeValue => "E013",
            ErrorCode::InvalidModePolicy => "E020",
            ErrorCode::InvalidRenderSettings => "E021",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Every segment is wider than the whole score
    SegmentWiderThanScore,
    /// W002: Duration sampler can produce negative durations
    NegativeDurationSupport,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::SegmentWiderThanScore => "W001",
            WarningCode::NegativeDurationSupport => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "short_durations.minimum.envelope").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for config and page-data operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Config validation failed with one or more errors.
    #[error("config validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of config validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any error carries the given code.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// The generator and renderer error types implement this trait so the CLI can
/// report every failure with a stable code and category.
///
/// # Example
///
/// ```ignore
/// use pages_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "GENERATE_001" or "RENDER_002".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidVoiceCount.to_string(), "E001");
        assert_eq!(ErrorCode::EventCountOverflow.to_string(), "E006");
        assert_eq!(ErrorCode::ZeroLikelihoodEnvelope.to_string(), "E011");
        assert_eq!(WarningCode::NegativeDurationSupport.to_string(), "W002");
    }

    #[test]
    fn test_validation_error_display_with_path() {
        let err = ValidationError::with_path(
            ErrorCode::InvalidEnvelope,
            "envelope needs at least 2 points",
            "short_durations.minimum.envelope",
        );
        assert_eq!(
            err.to_string(),
            "E010: envelope needs at least 2 points (at short_durations.minimum.envelope)"
        );
    }

    #[test]
    fn test_validation_result_tracks_errors() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::InvalidPageCount, "zero pages"));
        assert!(!result.is_ok());
        assert!(result.has_error(ErrorCode::InvalidPageCount));
        assert!(!result.has_error(ErrorCode::InvalidVoiceCount));
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
