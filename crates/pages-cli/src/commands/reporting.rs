use anyhow::{Context, Result};
use colored::Colorize;
use pages_spec::{BackendError, PageSequence, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

/// Exit code for generation and render failures.
pub(crate) const FAILURE_EXIT_CODE: u8 = 2;

/// Print validation errors and warnings.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            println!("  {} {}", "x".red(), error);
        }
    }
    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }
}

/// Print one line per page: mode, aggregate event count, and per-voice counts.
pub(crate) fn print_page_summary(pages: &PageSequence) {
    for page in pages {
        let mode = page
            .event_sequences
            .first()
            .map(|e| if e.is_short { "short" } else { "long" })
            .unwrap_or("-");
        let counts = page
            .iter()
            .map(|e| e.event_count.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:>4}  {:<5}  {:>3} events  [{}]",
            page.page_number + 1,
            mode.dimmed(),
            page.aggregate_event_count(),
            counts
        );
    }
}

/// Report a backend failure and return the failure exit code.
pub(crate) fn report_failure<E: BackendError>(err: &E) -> ExitCode {
    println!(
        "\n{} [{}] {}",
        "FAILED".red().bold(),
        err.code(),
        err.message()
    );
    ExitCode::from(FAILURE_EXIT_CODE)
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
