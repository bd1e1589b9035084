//! Logging setup
//!
//! Stdout only, at INFO by default. `RUST_LOG` overrides the filter, e.g.
//! `RUST_LOG=overlay=trace` to follow every event the overlay handles.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
