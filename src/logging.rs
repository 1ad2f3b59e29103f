//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or this
/// crate's debug events with `verbose`. Stdout stays reserved for model output.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "warn,llmloader=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
