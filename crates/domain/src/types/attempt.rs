//! Attempt bookkeeping for one test's retry loop

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::failure::Failure;
use crate::impl_label_conversions;

/// Why a retry loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The last execution succeeded
    Passed,
    /// `attempts` reached `retry_count + 1`
    BudgetExhausted,
    /// The failure matched the hard-fail list
    HardFail,
    /// A retry list is configured and the failure is not on it
    NotRetryable,
}

impl_label_conversions!(Termination {
    Passed => "passed",
    BudgetExhausted => "budget_exhausted",
    HardFail => "hard_fail",
    NotRetryable => "not_retryable",
});

impl Termination {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Mutable state of a single retry loop
///
/// Created when the loop starts and consumed into a [`RetryOutcome`] when it
/// ends. `attempts` only moves forward, one step per execution, and the
/// failure history is append-only.
#[derive(Debug, Clone, Default)]
pub struct AttemptState {
    test_id: String,
    attempts: u32,
    exception_history: Vec<Failure>,
    last_failure: Option<Failure>,
    flaky_overridden: bool,
}

impl AttemptState {
    pub fn new(test_id: impl Into<String>) -> Self {
        Self { test_id: test_id.into(), ..Self::default() }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// Executions already performed
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Every failure observed so far, oldest first
    pub fn exception_history(&self) -> &[Failure] {
        &self.exception_history
    }

    /// Outcome of the most recent execution, `None` on success
    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    /// Most recent entry of the history
    pub fn last_recorded_failure(&self) -> Option<&Failure> {
        self.exception_history.last()
    }

    /// Whether a provisional success was turned back into a failure
    pub fn flaky_overridden(&self) -> bool {
        self.flaky_overridden
    }

    /// Count one execution and record its (final) outcome
    pub fn complete_attempt(&mut self, outcome: Option<Failure>) {
        self.attempts = self.attempts.saturating_add(1);
        if let Some(failure) = &outcome {
            self.exception_history.push(failure.clone());
        }
        self.last_failure = outcome;
    }

    pub fn mark_flaky_override(&mut self) {
        self.flaky_overridden = true;
    }

    pub fn into_outcome(self, termination: Termination, total_delay: Duration) -> RetryOutcome {
        RetryOutcome {
            test_id: self.test_id,
            attempts: self.attempts,
            exception_history: self.exception_history,
            final_failure: self.last_failure,
            termination,
            flaky_overridden: self.flaky_overridden,
            total_delay,
        }
    }
}

/// Terminal state of a retry loop
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOutcome {
    pub test_id: String,
    /// Total executions performed
    pub attempts: u32,
    pub exception_history: Vec<Failure>,
    /// Failure left on the test handle, `None` when the test passed
    pub final_failure: Option<Failure>,
    pub termination: Termination,
    pub flaky_overridden: bool,
    /// Sum of the waits requested between attempts
    pub total_delay: Duration,
}

impl RetryOutcome {
    pub fn passed(&self) -> bool {
        self.final_failure.is_none()
    }

    /// True when the test passed only after at least one retry
    pub fn passed_after_retry(&self) -> bool {
        self.passed() && self.attempts > 1
    }
}
