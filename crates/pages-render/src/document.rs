//! Document renderer capability.
//!
//! Each document kind (page, cover, score) knows where it goes by default and
//! how to turn its input into LaTeX source. Everything else (writing, compiling,
//! cleaning up) is shared and works on any [`DocumentRenderer`].

use std::path::{Path, PathBuf};

use crate::error::{RenderError, RenderResult};

/// A kind of document that can be produced from some input.
pub trait DocumentRenderer {
    /// What the document is rendered from.
    type Input: ?Sized;

    /// Default output path of the document, without extension.
    fn default_path(&self, input: &Self::Input) -> PathBuf;

    /// Renders the document source.
    fn render(&self, input: &Self::Input) -> String;
}

/// Writes the rendered source of `input` to `<path>.tex` and returns that path.
///
/// `path` defaults to [`DocumentRenderer::default_path`]. Parent directories
/// are created as needed.
pub fn write_document<R: DocumentRenderer>(
    renderer: &R,
    input: &R::Input,
    path: Option<&Path>,
) -> RenderResult<PathBuf> {
    let stem = match path {
        Some(path) => path.to_path_buf(),
        None => renderer.default_path(input),
    };
    let tex_path = with_suffix(&stem, "tex");

    if let Some(parent) = tex_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::WriteDocumentFailed {
                path: tex_path.clone(),
                source,
            })?;
        }
    }

    std::fs::write(&tex_path, renderer.render(input)).map_err(|source| {
        RenderError::WriteDocumentFailed {
            path: tex_path.clone(),
            source,
        }
    })?;
    Ok(tex_path)
}

/// Appends `.{suffix}` to `stem` without touching dots already in the name.
pub fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Escapes LaTeX special characters in plain text.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
