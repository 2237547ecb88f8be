//! LaTeX compilation with `lualatex`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::document::{with_suffix, write_document, DocumentRenderer};
use crate::error::{RenderError, RenderResult};
use crate::process::{find_tool, run_tool, ToolConfig, LUALATEX};

/// Compiles LaTeX sources into PDFs inside an output directory.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    tool: ToolConfig,
    output_dir: PathBuf,
}

impl LatexCompiler {
    /// Creates a compiler writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: ToolConfig::default(),
            output_dir: output_dir.into(),
        }
    }

    /// Uses the given tool settings.
    pub fn with_tool_config(mut self, tool: ToolConfig) -> Self {
        self.tool = tool;
        self
    }

    /// Directory receiving the PDFs.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Compiles `tex_path` and returns the produced PDF path.
    ///
    /// With `cleanup`, the `.tex`, `.aux` and `.log` files are removed
    /// afterwards.
    pub fn compile(&self, tex_path: &Path, cleanup: bool) -> RenderResult<PathBuf> {
        let executable = find_tool(LUALATEX, &self.tool)?;
        std::fs::create_dir_all(&self.output_dir)?;

        // lualatex --output-directory=<dir> --output-format=pdf -interaction=batchmode <file>.tex
        let mut cmd = Command::new(executable);
        let mut output_arg = std::ffi::OsString::from("--output-directory=");
        output_arg.push(&self.output_dir);
        cmd.arg(output_arg)
            .arg("--output-format=pdf")
            .arg("-interaction=batchmode")
            .arg(tex_path);
        run_tool(LUALATEX, cmd, &self.tool)?;

        let stem = tex_path
            .file_stem()
            .map(|s| self.output_dir.join(s))
            .unwrap_or_else(|| self.output_dir.join("document"));
        let pdf_path = with_suffix(&stem, "pdf");
        if !pdf_path.exists() {
            return Err(RenderError::OutputNotFound { path: pdf_path });
        }

        if cleanup {
            remove_if_exists(tex_path)?;
            remove_if_exists(&with_suffix(&stem, "aux"))?;
            remove_if_exists(&with_suffix(&stem, "log"))?;
        }
        log::debug!("compiled {}", pdf_path.display());
        Ok(pdf_path)
    }

    /// Writes the document of `input` and compiles it.
    pub fn compile_document<R: DocumentRenderer>(
        &self,
        renderer: &R,
        input: &R::Input,
        path: Option<&Path>,
        cleanup: bool,
    ) -> RenderResult<PathBuf> {
        let tex_path = write_document(renderer, input, path)?;
        self.compile(&tex_path, cleanup)
    }
}

/// Removes a file, ignoring files that are already gone.
pub(crate) fn remove_if_exists(path: &Path) -> RenderResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RenderError::Io(e)),
    }
}
