//! Ports for the retry orchestrator
//!
//! The orchestrator owns none of the collaborators it drives. The test under
//! retry, the output stream and the retry-count override are all supplied by
//! the host through these traits.

use rebound_domain::{AttemptState, Failure, Metadata};

/// Handle to a single test case
///
/// `execute` runs the test body once and leaves its outcome in the
/// last-failure slot. The orchestrator reads, clears and (for flaky
/// detection) overwrites that slot.
pub trait TestCase {
    /// Stable identity used in logs and outcomes
    fn id(&self) -> &str;

    /// Human-readable location, e.g. `./spec/login_spec.rb:12`
    fn location(&self) -> &str;

    fn metadata(&self) -> &Metadata;

    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Run the test body once
    fn execute(&mut self);

    fn last_failure(&self) -> Option<&Failure>;

    fn clear_last_failure(&mut self);

    fn set_last_failure(&mut self, failure: Option<Failure>);

    /// Drop memoized per-test state so the next execution starts clean
    fn reset_shared_fixtures(&mut self);
}

/// Sink for diagnostic text
pub trait Reporter: Send + Sync {
    fn message(&self, message: &str);
}

/// Observer notified before every retry
pub trait RetryListener: Send + Sync {
    /// Called before execution `state.attempts() + 1` of `test`
    fn on_retry(&self, test: &dyn TestCase, state: &AttemptState);
}

/// Source of a forced retry count
///
/// A value returned here wins over every other retry-count source. It is
/// consulted once per loop start and must not be cached across loops.
pub trait RetryCountOverride: Send + Sync {
    fn retry_count(&self) -> Option<i64>;
}

/// Override source that never forces a count
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverride;

impl RetryCountOverride for NoOverride {
    fn retry_count(&self) -> Option<i64> {
        None
    }
}

/// Override source returning a fixed count
#[derive(Debug, Clone, Copy)]
pub struct FixedRetryCount(pub i64);

impl RetryCountOverride for FixedRetryCount {
    fn retry_count(&self) -> Option<i64> {
        Some(self.0)
    }
}

/// Reporter that discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn message(&self, _message: &str) {}
}
