//! Tracing subscriber setup for the binary.
//!
//! Log lines go to stderr so the game transcript on stdout stays clean.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "warn";

/// Installs the global subscriber.
///
/// Priority: `RUST_LOG` env var > `level` > `warn`.
pub(crate) fn init(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}
