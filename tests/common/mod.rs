//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;

/// Initialize console tracing for a test binary
///
/// Respects RUST_LOG for filtering (e.g. `RUST_LOG=chord=debug` to watch
/// arm/match decisions); defaults to warnings. Safe to call from every
/// test; only the first call in a process installs the subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
