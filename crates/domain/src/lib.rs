//! # Rebound Domain
//!
//! Domain types for retry orchestration of individual test executions.
//!
//! This crate contains:
//! - Failures and their type lineage (`Failure`, `FailureKind`)
//! - Failure matchers used by hard-fail and retry lists (`Matcher`)
//! - Per-test metadata and retry options (`Metadata`, `RetryOptions`)
//! - Attempt bookkeeping and loop outcomes (`AttemptState`, `RetryOutcome`)
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Rebound crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
