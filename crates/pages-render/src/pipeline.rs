//! From page sequence to a single PDF.
//!
//! Pages are rendered and compiled by a pool of worker threads pulling jobs
//! from a channel. Workers only read the pages. Results are put back in page
//! order, then the cover and the pages are joined into one document.

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::unbounded;
use pages_spec::{Page, PageSequence, RenderConfig};

use crate::compile::{remove_if_exists, LatexCompiler};
use crate::concat::PdfConcatenator;
use crate::cover::CoverRenderer;
use crate::error::{RenderError, RenderResult};
use crate::page::PageRenderer;
use crate::score::ScoreRenderer;

/// Renders a page sequence into a single PDF.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    page_renderer: PageRenderer,
    cover_renderer: CoverRenderer,
    compiler: LatexCompiler,
    concatenator: PdfConcatenator,
    paper: String,
    build_dir: PathBuf,
    jobs: usize,
    cleanup: bool,
}

impl RenderPipeline {
    /// Creates a pipeline from render settings.
    ///
    /// Uses one worker per available CPU and removes intermediate files.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            page_renderer: PageRenderer::new(&config.paper, &config.build_dir),
            cover_renderer: CoverRenderer::new(&config.title, &config.build_dir),
            compiler: LatexCompiler::new(&config.build_dir),
            concatenator: PdfConcatenator::new(),
            paper: config.paper.clone(),
            build_dir: config.build_dir.clone(),
            jobs: default_jobs(),
            cleanup: true,
        }
    }

    /// Sets the number of worker threads (at least 1).
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Sets whether intermediate files are removed.
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Uses the given LaTeX compiler.
    pub fn with_compiler(mut self, compiler: LatexCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Uses the given PDF concatenator.
    pub fn with_concatenator(mut self, concatenator: PdfConcatenator) -> Self {
        self.concatenator = concatenator;
        self
    }

    /// Default path of the joined document.
    pub fn default_output_path(&self, voice_count: usize) -> PathBuf {
        self.build_dir
            .join(format!("pages_for_{}_players_{}.pdf", voice_count, self.paper))
    }

    /// Renders the cover and every page, then joins them into `output` (or the
    /// default output path).
    pub fn render(&self, pages: &PageSequence, output: Option<&Path>) -> RenderResult<PathBuf> {
        if pages.is_empty() {
            return Err(RenderError::EmptyPageSequence);
        }
        let voice_count = pages.voice_count();
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(voice_count),
        };

        let cover = self.compiler.compile_document(
            &self.cover_renderer,
            &voice_count,
            None,
            self.cleanup,
        )?;
        let mut documents = vec![cover];
        documents.extend(self.render_pages(pages)?);

        let joined = self.concatenator.concatenate(&documents, &output)?;
        if self.cleanup {
            for document in &documents {
                remove_if_exists(document)?;
            }
        }
        Ok(joined)
    }

    /// Renders and compiles every page concurrently, returning the PDF paths
    /// in page order.
    pub fn render_pages(&self, pages: &PageSequence) -> RenderResult<Vec<PathBuf>> {
        let page_count = pages.len();
        if page_count == 0 {
            return Ok(Vec::new());
        }
        let workers = self.jobs.min(page_count);
        log::info!("rendering {} pages with {} workers", page_count, workers);

        let (job_tx, job_rx) = unbounded::<(usize, &Page)>();
        let (result_tx, result_rx) = unbounded::<(usize, RenderResult<PathBuf>)>();
        for job in pages.iter().enumerate() {
            job_tx
                .send(job)
                .map_err(|_| RenderError::worker_failed("job queue closed"))?;
        }
        drop(job_tx);

        thread::scope(|scope| -> RenderResult<()> {
            let mut handles = Vec::with_capacity(workers);
            for worker in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let handle = thread::Builder::new()
                    .name(format!("render-{}", worker))
                    .spawn_scoped(scope, move || {
                        for (index, page) in job_rx.iter() {
                            let result = self.compiler.compile_document(
                                &self.page_renderer,
                                page,
                                None,
                                self.cleanup,
                            );
                            if result_tx.send((index, result)).is_err() {
                                break;
                            }
                        }
                    })?;
                handles.push(handle);
            }
            for handle in handles {
                handle
                    .join()
                    .map_err(|_| RenderError::worker_failed("render worker panicked"))?;
            }
            Ok(())
        })?;
        drop(result_tx);

        let mut slots: Vec<Option<RenderResult<PathBuf>>> = (0..page_count).map(|_| None).collect();
        for (index, result) in result_rx.iter() {
            slots[index] = Some(result);
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(RenderError::worker_failed(format!(
                        "page {} was never rendered",
                        index
                    )))
                })
            })
            .collect()
    }

    /// Compiles the score document.
    pub fn render_score(&self, score: &ScoreRenderer) -> RenderResult<PathBuf> {
        self.compiler.compile_document(score, &(), None, self.cleanup)
    }
}

fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let config = RenderConfig {
            paper: "a3paper".to_string(),
            title: "pages".to_string(),
            build_dir: PathBuf::from("builds"),
        };
        let pipeline = RenderPipeline::from_config(&config);
        assert_eq!(
            pipeline.default_output_path(5),
            PathBuf::from("builds/pages_for_5_players_a3paper.pdf")
        );
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let pipeline = RenderPipeline::from_config(&RenderConfig::default());
        let err = pipeline.render(&PageSequence::default(), None).unwrap_err();
        assert!(matches!(err, RenderError::EmptyPageSequence));
        assert!(pipeline.render_pages(&PageSequence::default()).unwrap().is_empty());
    }

    #[test]
    fn test_jobs_at_least_one() {
        let pipeline = RenderPipeline::from_config(&RenderConfig::default()).jobs(0);
        assert_eq!(pipeline.jobs, 1);
    }
}
