//! Tracing bootstrap for hosts embedding the retry engine
//!
//! The engine itself only emits `tracing` events. Hosts that do not already
//! install a subscriber can call [`init_tracing`] once per process.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// `fallback` is used when `RUST_LOG` is unset or invalid (defaults to
/// [`DEFAULT_FILTER`]). Returns `false` when a global subscriber was already
/// installed, which is expected when several test binaries share a process.
pub fn init_tracing(fallback: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .is_ok()
}
