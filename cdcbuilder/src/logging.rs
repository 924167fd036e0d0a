//! Tracing for following a build step by step.
//!
//! Events cover config loading, library loading, the output directory cleanup
//! (one event per deleted file) and every configurator call with its step and
//! result code. They go to stderr only. Stdout stays reserved for the usage
//! block, diagnostic lines and the success line, which scripts parse and which
//! `RUST_LOG` never changes.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
///
/// Only close failures after an earlier failure and similar secondary
/// problems surface at `warn`.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber.
///
/// ```bash
/// RUST_LOG=cdcbuilder=debug cdcbuilder project.xml -o out/
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    // Tests may install a subscriber first.
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

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
