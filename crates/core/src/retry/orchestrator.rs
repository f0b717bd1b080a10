//! Retry orchestrator - drives repeated execution of one test

use std::sync::Arc;
use std::time::Duration;

use rebound_common::time::{Sleeper, ThreadSleeper};
use rebound_domain::constants::RETRY_ATTEMPTS_TAG;
use rebound_domain::{AttemptState, RetryOptions, RetryOutcome, Termination};
use tracing::{debug, info, warn};

use super::classify::{classify, Verdict};
use super::config::SharedConfig;
use super::format::{retry_message, try_failure_message};
use super::policy::EffectivePolicy;
use super::ports::{NoOverride, Reporter, RetryCountOverride, TestCase};

/// Runs a test until it passes or a termination rule fires
///
/// The orchestrator never fails. Its result is the failure slot of the test
/// handle plus the returned [`RetryOutcome`].
pub struct RetryOrchestrator {
    config: SharedConfig,
    reporter: Arc<dyn Reporter>,
    sleeper: Arc<dyn Sleeper>,
    retry_count_override: Arc<dyn RetryCountOverride>,
}

impl RetryOrchestrator {
    /// Create an orchestrator that sleeps on the calling thread and has no
    /// retry-count override
    pub fn new(config: SharedConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            config,
            reporter,
            sleeper: Arc::new(ThreadSleeper),
            retry_count_override: Arc::new(NoOverride),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_retry_count_override(mut self, source: Arc<dyn RetryCountOverride>) -> Self {
        self.retry_count_override = source;
        self
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Execute `test` with retries.
    ///
    /// `overrides` are merged into the test's metadata before the policy is
    /// resolved and stay there afterwards. The configuration is read once,
    /// here; the lock is not held while the test or any callback runs.
    pub fn run_with_retry(
        &self,
        test: &mut dyn TestCase,
        overrides: Option<RetryOptions>,
    ) -> RetryOutcome {
        if let Some(overrides) = overrides {
            test.metadata_mut().merge_options(overrides);
        }

        let config = self.config.read().clone();
        let policy = EffectivePolicy::resolve(&config, &*test, self.retry_count_override.as_ref());
        let mut state = AttemptState::new(test.id());
        let mut total_delay = Duration::ZERO;

        debug!(
            test_id = %state.test_id(),
            retry_count = policy.retry_count,
            flaky_detection = policy.flaky_spec_detection,
            "Starting retry loop"
        );

        loop {
            let attempts = state.attempts();

            if attempts > 0 {
                for listener in &config.listeners {
                    listener.on_retry(&*test, &state);
                }
                if policy.verbose_retry {
                    self.reporter.message(&retry_message(attempts, test.location()));
                }
            }

            test.metadata_mut().set_tag(RETRY_ATTEMPTS_TAG, attempts);
            test.clear_last_failure();
            debug!(test_id = %state.test_id(), attempt = attempts + 1, "Executing test");
            test.execute();

            if test.last_failure().is_none() && attempts > 0 {
                if let Some(callback) = &config.flaky_test_callback {
                    callback(&mut *test, &state);
                }

                if policy.flaky_spec_detection && attempts == 1 {
                    if let Some(previous) = state.last_recorded_failure().cloned() {
                        debug!(
                            test_id = %state.test_id(),
                            "Success on first retry, replaying previous failure for confirmation"
                        );
                        test.set_last_failure(Some(previous));
                        state.mark_flaky_override();
                        if policy.display_try_failure_messages {
                            self.display_try_failure(&*test, attempts, &policy);
                        }
                    }
                }
            }

            state.complete_attempt(test.last_failure().cloned());

            let verdict = match state.last_failure() {
                None => Verdict::Stop(Termination::Passed),
                Some(failure) => classify(&policy, state.attempts(), failure),
            };

            if let Verdict::Stop(termination) = verdict {
                if termination.is_success() && state.attempts() > 1 {
                    info!(
                        test_id = %state.test_id(),
                        attempts = state.attempts(),
                        "Test passed after retry"
                    );
                } else {
                    debug!(
                        test_id = %state.test_id(),
                        attempts = state.attempts(),
                        termination = %termination,
                        "Retry loop finished"
                    );
                }
                return state.into_outcome(termination, total_delay);
            }

            warn!(
                test_id = %state.test_id(),
                attempt = state.attempts(),
                retry_count = policy.retry_count,
                failure = %state.last_failure().map(ToString::to_string).unwrap_or_default(),
                "Test failed, retrying"
            );

            if policy.verbose_retry && policy.display_try_failure_messages {
                self.display_try_failure(&*test, state.attempts(), &policy);
            }

            if policy.clear_lets_on_failure {
                test.reset_shared_fixtures();
            }

            if let Some(callback) = &config.retry_callback {
                callback(&mut *test, &state);
            }

            if state.flaky_overridden() {
                if let Some(callback) = &config.flaky_spec_detection {
                    callback(&mut *test, &state);
                }
            }

            let delay = policy.sleep.interval(state.attempts());
            if !delay.is_zero() {
                debug!(
                    test_id = %state.test_id(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Sleeping before next attempt"
                );
                self.sleeper.sleep(delay);
                total_delay = total_delay.saturating_add(delay);
            }
        }
    }

    fn display_try_failure(&self, test: &dyn TestCase, attempts: u32, policy: &EffectivePolicy) {
        let Some(failure) = test.last_failure() else {
            return;
        };
        if let Some(message) =
            try_failure_message(attempts, policy.retry_count, test.location(), failure)
        {
            self.reporter.message(&message);
        }
    }
}
