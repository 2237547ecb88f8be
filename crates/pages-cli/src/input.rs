//! Loading configs and generated page sequences from JSON files.

use pages_spec::{PageSequence, PagesConfig};
use std::path::{Path, PathBuf};

/// Default file name written by `pages init`.
pub const DEFAULT_CONFIG_FILE: &str = "pages.json";

/// A loaded config with source provenance.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The parsed config.
    pub config: PagesConfig,
    /// BLAKE3 hash of the file content.
    pub source_hash: String,
}

/// Errors that can occur while loading input files.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::JsonParse { .. } => None,
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<LoadResult, InputError> {
    let content = read_file(path)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let config = PagesConfig::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(LoadResult {
        config,
        source_hash,
    })
}

/// Load a config from `path`, or the default config when no path is given.
pub fn load_config_or_default(path: Option<&str>) -> Result<PagesConfig, InputError> {
    match path {
        Some(path) => load_config(Path::new(path)).map(|loaded| loaded.config),
        None => Ok(PagesConfig::default()),
    }
}

/// Load a previously generated page sequence.
pub fn load_pages(path: &Path) -> Result<PageSequence, InputError> {
    let content = read_file(path)?;
    PageSequence::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
