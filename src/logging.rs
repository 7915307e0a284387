#![cfg(feature = "logging")]
//! Logging setup for examples and test harnesses.

use tracing_subscriber::EnvFilter;

/// Sets up logging of the events this crate reports.
///
/// Use the `RUST_LOG` environment variable to override the defaults, e.g.
/// `RUST_LOG=netdb=trace` to see every comparator decision while ordering
/// destinations.
///
/// Repeated calls are harmless; only the first subscriber wins.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();
}
