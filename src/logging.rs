//! Diagnostic logging setup
//!
//! User-facing messages go through [`crate::output`]. This is the `tracing`
//! side: debug and trace events about scanning, sizing and deletion, written to
//! stderr. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given `-q` / `-v` flags
pub fn default_directive(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "tidyup=debug",
        _ => "tidyup=trace",
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(quiet: bool, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
