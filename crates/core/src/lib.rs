//! # Rebound Core
//!
//! Retry orchestration for individual test executions.
//!
//! This crate contains:
//! - The attempt loop (`RetryOrchestrator`)
//! - Effective policy resolution and termination rules
//! - Port interfaces (traits) for tests, reporters and overrides
//!
//! ## Architecture Principles
//! - Only depends on `rebound-common` and `rebound-domain`
//! - No environment, file or terminal access
//! - All external collaborators via traits

pub mod retry;

pub use retry::{
    EffectivePolicy, FixedRetryCount, NoOverride, ReboundConfig, Reporter, RetryCountOverride,
    RetryListener, RetryOrchestrator, RetrySettings, SharedConfig, SilentReporter, TestCase,
};
