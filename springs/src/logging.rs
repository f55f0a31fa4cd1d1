//! Development-time tracing for the arrangement counter.
//!
//! Diagnostics go to stderr via `RUST_LOG`; stdout carries only results so
//! totals can be piped.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber.
///
/// Only the first call installs anything; later calls are no-ops.
///
/// ```bash
/// RUST_LOG=springs=debug springs sum input.txt
/// ```
pub fn init() {
    let filter = filter_from(std::env::var("RUST_LOG").ok().as_deref());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
