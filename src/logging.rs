// src/logging.rs
//! tracing-subscriber setup for the CLI (feature `logging`)

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global fmt subscriber. `RUST_LOG` wins over the config filter.
///
/// Idempotent — a second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&crate::config::load().logging.filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
