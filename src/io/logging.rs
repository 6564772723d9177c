//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Filter directive for the requested verbosity
///
/// `quiet` keeps only errors; each `verbose` step raises the crate's own level.
pub fn filter_directive(quiet: bool, verbose: u8) -> String {
    let crate_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let http_level = if verbose > 0 && !quiet { "debug" } else { "warn" };
    format!("chassistile={crate_level},tower_http={http_level},warn")
}

/// Install the global subscriber, preferring `RUST_LOG` when set
///
/// Logs go to stderr so command output on stdout stays clean. Calling this
/// more than once keeps the first subscriber.
pub fn init(quiet: bool, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
