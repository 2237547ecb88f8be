//! Pages CLI - Command-line interface for procedural score pages
//!
//! This binary provides commands for writing, validating, and generating
//! pages configs, and for rendering the generated score into PDF.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pages_cli::{commands, logging};

/// Pages - Procedural multi-voice score generator
#[derive(Parser)]
#[command(name = "pages")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log progress (info level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config
    Init {
        /// Output config path (default: pages.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a config file
    Validate {
        /// Path to the config file
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate the page sequence of a config
    Generate {
        /// Path to the config file
        #[arg(short, long)]
        config: String,

        /// Write the generated pages as JSON to this path
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Render the score pages into one PDF
    Render {
        /// Path to the config file
        #[arg(short, long)]
        config: String,

        /// Previously generated pages JSON (generated from the config when absent)
        #[arg(long)]
        pages: Option<String>,

        /// Output PDF path (default: inside the build directory)
        #[arg(short, long)]
        output: Option<String>,

        /// Keep intermediate .tex, .aux, .log and per-page PDFs
        #[arg(long)]
        keep_intermediate: bool,

        /// Number of render workers (default: available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Render the score (instructions) document
    Score {
        /// Path to the config file (defaults when absent)
        #[arg(short, long)]
        config: Option<String>,

        /// Keep intermediate .tex, .aux and .log
        #[arg(long)]
        keep_intermediate: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { output, force } => commands::init::run(output.as_deref(), force),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Generate {
            config,
            output,
            pretty,
        } => commands::generate::run(&config, output.as_deref(), pretty),
        Commands::Render {
            config,
            pages,
            output,
            keep_intermediate,
            jobs,
        } => commands::render::run(
            &config,
            pages.as_deref(),
            output.as_deref(),
            keep_intermediate,
            jobs,
        ),
        Commands::Score {
            config,
            keep_intermediate,
        } => commands::score::run(config.as_deref(), keep_intermediate),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "pages",
            "generate",
            "--config",
            "pages.json",
            "-o",
            "out.json",
            "--pretty",
        ])
        .unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Generate {
                config,
                output,
                pretty,
            } => {
                assert_eq!(config, "pages.json");
                assert_eq!(output.as_deref(), Some("out.json"));
                assert!(pretty);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "pages",
            "render",
            "-c",
            "pages.json",
            "--pages",
            "generated.json",
            "--keep-intermediate",
            "--jobs",
            "3",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                config,
                pages,
                output,
                keep_intermediate,
                jobs,
            } => {
                assert_eq!(config, "pages.json");
                assert_eq!(pages.as_deref(), Some("generated.json"));
                assert!(output.is_none());
                assert!(keep_intermediate);
                assert_eq!(jobs, Some(3));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_score_without_config() {
        let cli = Cli::try_parse_from(["pages", "score"]).unwrap();
        match cli.command {
            Commands::Score {
                config,
                keep_intermediate,
            } => {
                assert!(config.is_none());
                assert!(!keep_intermediate);
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_cli_parses_validate_json() {
        let cli = Cli::try_parse_from(["pages", "validate", "-c", "pages.json", "--json"]).unwrap();
        match cli.command {
            Commands::Validate { config, json } => {
                assert_eq!(config, "pages.json");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_requires_config_for_generate() {
        assert!(Cli::try_parse_from(["pages", "generate"]).is_err());
    }
}
