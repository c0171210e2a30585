//! Tracing initialization hooks.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,wedding_quiz=debug";

/// Initialize the global tracing subscriber, writing to stderr.
///
/// Use RUST_LOG to configure, e.g.:
/// RUST_LOG=wedding_quiz=debug,reqwest=info
pub fn init(verbose: bool) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
