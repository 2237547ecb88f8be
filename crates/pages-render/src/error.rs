//! Error types for the renderer.

use pages_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering documents.
#[derive(Debug, Error)]
pub enum RenderError {
    /// External tool not found.
    #[error("{tool} executable not found. Ensure it is installed and in PATH, or set {env_var}")]
    ToolNotFound {
        tool: &'static str,
        env_var: &'static str,
    },

    /// Failed to spawn an external tool.
    #[error("Failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// External tool timed out.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout { tool: &'static str, timeout_secs: u64 },

    /// External tool exited with non-zero status.
    #[error("{tool} exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        tool: &'static str,
        exit_code: i32,
        stderr: String,
    },

    /// Failed to write a document source.
    #[error("Failed to write document {path}: {source}")]
    WriteDocumentFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file not found after an external tool finished.
    #[error("Expected output file not found: {path}")]
    OutputNotFound { path: PathBuf },

    /// There is nothing to render.
    #[error("Page sequence is empty")]
    EmptyPageSequence,

    /// A render worker stopped without reporting its page.
    #[error("Render worker failed: {0}")]
    WorkerFailed(String),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Creates a new process failed error.
    pub fn process_failed(tool: &'static str, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            tool,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new worker failed error.
    pub fn worker_failed(message: impl Into<String>) -> Self {
        Self::WorkerFailed(message.into())
    }
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::ToolNotFound { .. } => "RENDER_001",
            RenderError::SpawnFailed { .. } => "RENDER_002",
            RenderError::Timeout { .. } => "RENDER_003",
            RenderError::ProcessFailed { .. } => "RENDER_004",
            RenderError::WriteDocumentFailed { .. } => "RENDER_005",
            RenderError::OutputNotFound { .. } => "RENDER_006",
            RenderError::EmptyPageSequence => "RENDER_007",
            RenderError::WorkerFailed(_) => "RENDER_008",
            RenderError::Io(_) => "RENDER_009",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}
