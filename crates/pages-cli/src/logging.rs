//! Logger setup.

/// Default log filter: `info` when verbose, `warn` otherwise.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Installs the global logger. `RUST_LOG` overrides the default filter.
///
/// Calling this more than once keeps the first logger.
pub fn init(verbose: bool) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    )
    .format_timestamp_millis()
    .try_init();
}
