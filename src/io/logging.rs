//! Diagnostic output setup

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity
pub const fn default_directive(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Install the global `fmt` subscriber writing to stderr
///
/// `RUST_LOG` overrides the default filter. Calling this more than once
/// keeps the first subscriber.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
