//! Tracing initialization shared by binaries and tests

use tracing_subscriber::EnvFilter;

/// Initialize tracing with an explicit default level.
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once;
/// later calls are no-ops (relevant when tests share a process).
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
