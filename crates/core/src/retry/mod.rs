//! Retry orchestration
//!
//! - [`ports`]: collaborators the orchestrator drives
//! - [`config`]: global settings, callbacks and the shared configuration
//! - [`policy`]: per-loop effective policy resolution
//! - [`classify`]: termination checks after a failed execution
//! - [`format`]: reporter message formatting
//! - [`orchestrator`]: the attempt loop

pub mod classify;
pub mod config;
pub mod format;
pub mod orchestrator;
pub mod policy;
pub mod ports;

pub use classify::{classify, Verdict};
pub use config::{
    ReboundConfig, RetryCountCondition, RetrySettings, SharedConfig, TestCallback,
};
pub use format::{ordinalize, retry_message, try_failure_message};
pub use orchestrator::RetryOrchestrator;
pub use policy::{clamp_retry_count, EffectivePolicy, SleepSchedule};
pub use ports::{
    FixedRetryCount, NoOverride, Reporter, RetryCountOverride, RetryListener, SilentReporter,
    TestCase,
};
