//! # Rebound Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment variables, `.env`, TOML/JSON files)
//! - The environment-backed retry-count override
//! - Reporters writing to `tracing` or any `io::Write`
//!
//! ## Architecture
//! - Implements traits defined in `rebound-core`
//! - Contains all "impure" code (environment, filesystem, output streams)

pub mod bootstrap;
pub mod config;
pub mod env_override;
pub mod reporter;

// Re-export commonly used items
pub use bootstrap::{init_logging, orchestrator_from_env};
pub use env_override::EnvRetryCountOverride;
pub use reporter::{TracingReporter, WriterReporter};
