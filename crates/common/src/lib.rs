//! Modular common utilities shared across Rebound crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: serde helpers
//! - `observability`: tracing subscriber bootstrap
//! - `runtime`: time abstractions used by the retry loop
//! - `test-utils`: deterministic doubles for the runtime tier

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod utils;

// Observability tier
// -------------------------------------------------------------
#[cfg(feature = "observability")]
pub mod observability;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(any(feature = "runtime", test))]
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "observability")]
pub use observability::init_tracing;
#[cfg(any(feature = "runtime", test))]
pub use time::{Sleeper, ThreadSleeper};
#[cfg(feature = "foundation")]
pub use utils::serde::duration_millis;
