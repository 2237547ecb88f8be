//! Pages Renderer
//!
//! This crate turns a generated [`PageSequence`](pages_spec::PageSequence) into
//! print-ready PDFs. Documents are LaTeX sources compiled with `lualatex`; the
//! cover and the pages are then joined with `pdftk`.
//!
//! # Architecture
//!
//! - [`DocumentRenderer`] is the only thing a document kind implements: a
//!   default output path and the LaTeX source. Pages, the cover and the score
//!   are the three kinds.
//! - [`LatexCompiler`] and [`PdfConcatenator`] run the external tools.
//! - [`RenderPipeline`] compiles pages on a pool of worker threads and joins the
//!   result in page order.
//!
//! # Tool Requirements
//!
//! Each tool is searched for in:
//!
//! 1. The configured executable path
//! 2. `PAGES_LUALATEX` / `PAGES_PDFTK` environment variables
//! 3. System PATH
//!
//! # Example
//!
//! ```ignore
//! use pages_render::RenderPipeline;
//!
//! let result = pages_generator::generate_pages(&config)?;
//! let pdf = RenderPipeline::from_config(&config.render).render(&result.pages, None)?;
//! println!("Rendered: {}", pdf.display());
//! ```

pub mod compile;
pub mod concat;
pub mod cover;
pub mod document;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod player_data;
pub mod process;
pub mod score;

pub use compile::LatexCompiler;
pub use concat::PdfConcatenator;
pub use cover::CoverRenderer;
pub use document::{write_document, DocumentRenderer};
pub use error::{RenderError, RenderResult};
pub use page::PageRenderer;
pub use pipeline::RenderPipeline;
pub use process::{ToolConfig, DEFAULT_TIMEOUT_SECS};
pub use score::ScoreRenderer;
