//! Validate command implementation
//!
//! Loads a config and reports every validation problem at once.

use anyhow::{Context, Result};
use colored::Colorize;
use pages_spec::validate_config;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    error_codes, input_error_to_json, validation_error_to_json, validation_warning_to_json,
    JsonError, ValidateOutput, ValidateResult,
};
use super::reporting;
use crate::input::{load_config, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the config file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(config_path: &str) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let LoadResult {
        config,
        source_hash,
    } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

    let result = validate_config(&config);
    let duration_ms = start.elapsed().as_millis() as u64;
    reporting::print_validation_results(&result);

    if result.is_ok() {
        println!(
            "\n{} Config is valid: {} voices, {} pages ({}ms)",
            "SUCCESS".green().bold(),
            config.voice_count,
            config.page_count,
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Config has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            result.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(config_path: &str) -> Result<ExitCode> {
    let start = Instant::now();

    let (output, code) = match load_config(Path::new(config_path)) {
        Ok(LoadResult {
            config,
            source_hash,
        }) => {
            let result = validate_config(&config);
            let warnings = result
                .warnings
                .iter()
                .map(validation_warning_to_json)
                .collect();
            if result.is_ok() {
                let details = ValidateResult {
                    voice_count: config.voice_count,
                    page_count: config.page_count,
                    seed: config.seed,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                (
                    ValidateOutput::success(details, source_hash, warnings),
                    ExitCode::SUCCESS,
                )
            } else {
                let errors = result.errors.iter().map(validation_error_to_json).collect();
                (
                    ValidateOutput::failure(errors, warnings, Some(source_hash)),
                    ExitCode::from(1),
                )
            }
        }
        Err(e) => (
            ValidateOutput::failure(vec![input_error_to_json(&e, config_path)], vec![], None),
            ExitCode::from(1),
        ),
    };

    let json = match serde_json::to_string_pretty(&output) {
        Ok(json) => json,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_SERIALIZE, e.to_string());
            serde_json::to_string_pretty(&ValidateOutput::failure(vec![error], vec![], None))
                .context("Failed to serialize validate output")?
        }
    };
    println!("{}", json);
    Ok(code)
}
