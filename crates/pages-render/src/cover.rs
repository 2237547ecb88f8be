//! Cover documents.

use std::path::PathBuf;

use crate::document::{escape_latex, DocumentRenderer};

/// Renders the cover of a score for a given number of voices.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverRenderer {
    /// Title printed on the cover.
    pub title: String,
    /// Directory of the default output paths.
    pub build_dir: PathBuf,
}

impl CoverRenderer {
    /// Creates a cover renderer.
    pub fn new(title: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            build_dir: build_dir.into(),
        }
    }
}

impl DocumentRenderer for CoverRenderer {
    /// Number of voices.
    type Input = usize;

    fn default_path(&self, voice_count: &usize) -> PathBuf {
        self.build_dir
            .join(format!("pages_cover_for_{}_voices", voice_count))
    }

    fn render(&self, voice_count: &usize) -> String {
        let players = if *voice_count == 1 { "player" } else { "players" };
        format!(
            "\\documentclass{{article}}\n\
             \\usepackage{{fontspec}}\n\
             \\pagestyle{{empty}}\n\
             \\begin{{document}}\n\
             \\begin{{center}}\n\
             \\vspace*{{6cm}}\n\
             {{\\Huge {title}}}\n\n\
             \\vspace{{1cm}}\n\
             {{\\Large for {count} {players}}}\n\
             \\end{{center}}\n\
             \\end{{document}}\n",
            title = escape_latex(&self.title),
            count = voice_count,
            players = players,
        )
    }
}
