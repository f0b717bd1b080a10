//! Termination checks applied after a failed execution

use rebound_domain::{matches_any, Failure, Termination};

use super::policy::EffectivePolicy;

/// Decision taken after a failed execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Retry,
    Stop(Termination),
}

/// Decide whether `failure`, observed after `attempts` executions, is retried.
///
/// Checks run in order: retry budget, hard-fail list, retry list. With flaky
/// detection on, the budget is not checked after the first execution so that
/// a confirmation pass always happens.
pub fn classify(policy: &EffectivePolicy, attempts: u32, failure: &Failure) -> Verdict {
    let confirmation_pending = policy.flaky_spec_detection && attempts == 1;

    if !confirmation_pending && attempts >= policy.max_attempts() {
        return Verdict::Stop(Termination::BudgetExhausted);
    }

    if matches_any(&policy.exceptions_to_hard_fail, Some(failure)) {
        return Verdict::Stop(Termination::HardFail);
    }

    if !policy.exceptions_to_retry.is_empty()
        && !matches_any(&policy.exceptions_to_retry, Some(failure))
    {
        return Verdict::Stop(Termination::NotRetryable);
    }

    Verdict::Retry
}
