//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Pick the filter directive: verbosity flags win over the configured level
pub fn filter_directive(verbosity: Verbosity, configured: &str) -> String {
    match verbosity {
        Verbosity::Quiet => "error".to_string(),
        Verbosity::Normal => configured.to_string(),
        Verbosity::Verbose => "info".to_string(),
        Verbosity::VeryVerbose => "debug".to_string(),
    }
}

/// Install the global fmt subscriber; `RUST_LOG` overrides everything
pub fn init(verbosity: Verbosity, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity, configured)));

    // A subscriber may already be installed (tests, embedding callers)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
