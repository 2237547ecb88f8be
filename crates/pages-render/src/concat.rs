//! PDF concatenation with `pdftk`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{RenderError, RenderResult};
use crate::process::{find_tool, run_tool, ToolConfig, PDFTK};

/// Joins PDFs in order into a single file.
#[derive(Debug, Clone, Default)]
pub struct PdfConcatenator {
    tool: ToolConfig,
}

impl PdfConcatenator {
    /// Creates a concatenator with default tool settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given tool settings.
    pub fn with_tool_config(mut self, tool: ToolConfig) -> Self {
        self.tool = tool;
        self
    }

    /// Concatenates `inputs` into `output` and returns `output`.
    pub fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> RenderResult<PathBuf> {
        let executable = find_tool(PDFTK, &self.tool)?;
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // pdftk <input...> output <path>
        let mut cmd = Command::new(executable);
        cmd.args(inputs).arg("output").arg(output);
        run_tool(PDFTK, cmd, &self.tool)?;

        if !output.exists() {
            return Err(RenderError::OutputNotFound {
                path: output.to_path_buf(),
            });
        }
        log::info!("joined {} documents into {}", inputs.len(), output.display());
        Ok(output.to_path_buf())
    }
}
