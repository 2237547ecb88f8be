//! Generate command implementation
//!
//! Generates the page sequence of a config, prints a per-page summary and
//! optionally writes the pages as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use pages_generator::{generate_pages, GenerateError, GenerateResult};
use pages_spec::PagesConfig;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting;
use crate::input::load_config;

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Path to the config file
/// * `output` - Where to write the page sequence JSON (not written when absent)
/// * `pretty` - Pretty-print the JSON
///
/// # Returns
/// Exit code: 0 on success, 1 for an invalid config, 2 if generation fails
pub fn run(config_path: &str, output: Option<&str>, pretty: bool) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Generating:".cyan().bold(), config_path);

    let config = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?
        .config;

    let result = match generate_or_report(&config) {
        Ok(result) => result,
        Err(code) => return Ok(code),
    };

    reporting::print_page_summary(&result.pages);

    if let Some(output) = output {
        let json = result
            .pages
            .to_json(pretty)
            .context("Failed to serialize pages")?;
        reporting::write_output(Path::new(output), &json)?;
        println!("{} {}", "Wrote:".dimmed(), output);
    }

    println!(
        "\n{} {} pages for {} voices ({}ms)",
        "SUCCESS".green().bold(),
        result.pages.len(),
        config.voice_count,
        start.elapsed().as_millis()
    );
    println!("{} {}", "Hash:".dimmed(), result.hash);
    Ok(ExitCode::SUCCESS)
}

/// Generates pages, printing a report and returning the exit code on failure.
pub(crate) fn generate_or_report(config: &PagesConfig) -> Result<GenerateResult, ExitCode> {
    match generate_pages(config) {
        Ok(result) => Ok(result),
        Err(GenerateError::InvalidConfig(errors)) => {
            println!("\n{}", "Errors:".red().bold());
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            println!(
                "\n{} Config has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
            Err(ExitCode::from(1))
        }
        Err(e) => Err(reporting::report_failure(&e)),
    }
}
