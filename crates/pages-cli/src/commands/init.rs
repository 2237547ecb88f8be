//! Init command implementation
//!
//! Writes the default config so it can be edited.

use anyhow::{Context, Result};
use colored::Colorize;
use pages_spec::PagesConfig;
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::DEFAULT_CONFIG_FILE;

/// Run the init command
///
/// # Arguments
/// * `output` - Config path (default: `pages.json`)
/// * `force` - Overwrite an existing file
///
/// # Returns
/// Exit code: 0 on success, 1 if the file exists and `force` is off
pub fn run(output: Option<&str>, force: bool) -> Result<ExitCode> {
    let path = Path::new(output.unwrap_or(DEFAULT_CONFIG_FILE));
    if path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            "FAILED".red().bold(),
            path.display()
        );
        return Ok(ExitCode::from(1));
    }

    let json = PagesConfig::default()
        .to_json_pretty()
        .context("Failed to serialize default config")?;
    reporting::write_output(path, &json)?;

    println!("{} {}", "Wrote:".green().bold(), path.display());
    Ok(ExitCode::SUCCESS)
}
