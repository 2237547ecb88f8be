//! Score command implementation
//!
//! Compiles the score (instructions) document.

use anyhow::{Context, Result};
use colored::Colorize;
use pages_render::{RenderPipeline, ScoreRenderer};
use std::process::ExitCode;

use super::reporting;
use crate::input::load_config_or_default;

/// Run the score command
///
/// # Arguments
/// * `config_path` - Config providing title and build directory (defaults when absent)
/// * `keep_intermediate` - Keep `.tex`, `.aux` and `.log`
///
/// # Returns
/// Exit code: 0 on success, 2 if rendering fails
pub fn run(config_path: Option<&str>, keep_intermediate: bool) -> Result<ExitCode> {
    let config = load_config_or_default(config_path).with_context(|| {
        format!(
            "Failed to load config file: {}",
            config_path.unwrap_or_default()
        )
    })?;
    println!("{} {}", "Rendering score:".cyan().bold(), config.render.title);

    let renderer = ScoreRenderer::new(&config.render.title, &config.render.build_dir);
    let pipeline = RenderPipeline::from_config(&config.render).cleanup(!keep_intermediate);
    match pipeline.render_score(&renderer) {
        Ok(path) => {
            println!("\n{} {}", "SUCCESS".green().bold(), path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(reporting::report_failure(&e)),
    }
}
