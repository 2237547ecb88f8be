//! Page documents.

use std::fmt::Write as _;
use std::path::PathBuf;

use pages_spec::Page;

use crate::document::DocumentRenderer;
use crate::player_data::{player_rows, Row};

/// Renders one page of the score as a standalone LaTeX document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRenderer {
    /// LaTeX paper option.
    pub paper: String,
    /// Directory of the default output paths.
    pub build_dir: PathBuf,
}

impl PageRenderer {
    /// Creates a page renderer.
    pub fn new(paper: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            paper: paper.into(),
            build_dir: build_dir.into(),
        }
    }
}

impl DocumentRenderer for PageRenderer {
    type Input = Page;

    fn default_path(&self, page: &Page) -> PathBuf {
        self.build_dir
            .join(format!("{}_{}", page.voice_count(), page.page_number))
    }

    fn render(&self, page: &Page) -> String {
        let rows = player_rows(page);
        let mut tex = String::new();

        let _ = writeln!(tex, r"\documentclass[{}]{{article}}", self.paper);
        tex.push_str(
            "\\usepackage{fontspec}\n\
             \\usepackage{booktabs}\n\
             \\usepackage[margin=2cm]{geometry}\n\
             \\pagestyle{empty}\n\
             \\begin{document}\n\
             \\begin{center}\n",
        );
        let _ = writeln!(tex, r"{{\Huge {}}}", page.page_number + 1);
        tex.push_str("\\vspace{2cm}\n\n\\begin{tabular}{c c c}\n\\toprule\n");

        if let Some((header, _)) = rows.first() {
            let _ = writeln!(tex, r"{} \\", table_row(header, true));
            tex.push_str("\\midrule\n");
        }
        for (_, content) in &rows {
            let _ = writeln!(tex, r"{} \\", table_row(content, false));
        }

        tex.push_str("\\bottomrule\n\\end{tabular}\n\\end{center}\n\\end{document}\n");
        tex
    }
}

fn table_row(row: &Row, bold: bool) -> String {
    row.iter()
        .map(|cell| {
            if bold {
                format!(r"\textbf{{{}}}", cell)
            } else {
                cell.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" & ")
}
