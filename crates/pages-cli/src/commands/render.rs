//! Render command implementation
//!
//! Generates (or loads) the page sequence and renders it into one PDF with
//! `lualatex` and `pdftk`.

use anyhow::{Context, Result};
use colored::Colorize;
use pages_render::RenderPipeline;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::generate::generate_or_report;
use super::reporting;
use crate::input::{load_config, load_pages};

/// Run the render command
///
/// # Arguments
/// * `config_path` - Path to the config file
/// * `pages_path` - Previously generated pages; generated from the config when absent
/// * `output` - Output PDF path (default: inside the build directory)
/// * `keep_intermediate` - Keep `.tex`, `.aux`, `.log` and per-page PDFs
/// * `jobs` - Number of render workers (default: available parallelism)
///
/// # Returns
/// Exit code: 0 on success, 1 for an invalid config, 2 if generation or rendering fails
pub fn run(
    config_path: &str,
    pages_path: Option<&str>,
    output: Option<&str>,
    keep_intermediate: bool,
    jobs: Option<usize>,
) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Rendering:".cyan().bold(), config_path);

    let config = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?
        .config;

    let pages = match pages_path {
        Some(path) => {
            println!("{} {}", "Pages:".dimmed(), path);
            load_pages(Path::new(path))
                .with_context(|| format!("Failed to load pages file: {}", path))?
        }
        None => match generate_or_report(&config) {
            Ok(result) => {
                println!("{} {}", "Hash:".dimmed(), result.hash);
                result.pages
            }
            Err(code) => return Ok(code),
        },
    };

    let mut pipeline = RenderPipeline::from_config(&config.render).cleanup(!keep_intermediate);
    if let Some(jobs) = jobs {
        pipeline = pipeline.jobs(jobs);
    }

    match pipeline.render(&pages, output.map(Path::new)) {
        Ok(path) => {
            println!(
                "\n{} {} ({} pages, {}ms)",
                "SUCCESS".green().bold(),
                path.display(),
                pages.len(),
                start.elapsed().as_millis()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(reporting::report_failure(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pages_spec::PagesConfig;

    #[test]
    fn test_empty_pages_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PagesConfig::default();
        config.render.build_dir = dir.path().join("builds");
        let config_path = dir.path().join("pages.json");
        std::fs::write(&config_path, config.to_json_pretty().unwrap()).unwrap();
        let pages_path = dir.path().join("generated.json");
        std::fs::write(&pages_path, r#"{"pages": []}"#).unwrap();

        let code = run(
            config_path.to_str().unwrap(),
            Some(pages_path.to_str().unwrap()),
            None,
            false,
            Some(1),
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn test_missing_config_is_an_error() {
        assert!(run("/nonexistent/pages.json", None, None, false, None).is_err());
    }
}
