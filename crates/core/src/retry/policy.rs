//! Effective policy resolution
//!
//! Every option is resolved once per loop start, field by field: the test's
//! metadata first, then the global configuration. The retry count has two
//! extra sources, the override port ahead of everything and the condition
//! function between metadata and the global default.

use std::time::Duration;

use rebound_domain::constants::MAX_BACKOFF_EXPONENT;
use rebound_domain::Matcher;

use super::config::ReboundConfig;
use super::ports::{RetryCountOverride, TestCase};

/// Wait schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepSchedule {
    Fixed(Duration),
    /// `2^(attempts - 1) * base`
    Exponential { base: Duration },
}

impl SleepSchedule {
    /// Wait after `attempts` executions
    pub fn interval(&self, attempts: u32) -> Duration {
        match *self {
            Self::Fixed(wait) => wait,
            Self::Exponential { base } => {
                let exponent = attempts.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
                base.saturating_mul(1_u32 << exponent)
            }
        }
    }
}

/// Options in force for one retry loop
#[derive(Debug, Clone)]
pub struct EffectivePolicy {
    pub retry_count: u32,
    pub sleep: SleepSchedule,
    pub exceptions_to_hard_fail: Vec<Matcher>,
    pub exceptions_to_retry: Vec<Matcher>,
    pub clear_lets_on_failure: bool,
    pub flaky_spec_detection: bool,
    pub verbose_retry: bool,
    pub display_try_failure_messages: bool,
}

impl EffectivePolicy {
    pub fn resolve(
        config: &ReboundConfig,
        test: &dyn TestCase,
        retry_count_override: &dyn RetryCountOverride,
    ) -> Self {
        let options = &test.metadata().options;
        let settings = &config.settings;

        let raw_count = retry_count_override
            .retry_count()
            .or(options.retry)
            .or_else(|| config.retry_count_condition.as_ref().and_then(|condition| condition(test)))
            .unwrap_or(settings.default_retry_count);

        let base_wait = options.retry_wait.unwrap_or(settings.default_sleep_interval);
        let sleep = if options.exponential_backoff.unwrap_or(settings.exponential_backoff) {
            SleepSchedule::Exponential { base: base_wait }
        } else {
            SleepSchedule::Fixed(base_wait)
        };

        Self {
            retry_count: clamp_retry_count(raw_count),
            sleep,
            exceptions_to_hard_fail: options
                .exceptions_to_hard_fail
                .clone()
                .unwrap_or_else(|| config.exceptions_to_hard_fail.clone()),
            exceptions_to_retry: options
                .exceptions_to_retry
                .clone()
                .unwrap_or_else(|| config.exceptions_to_retry.clone()),
            clear_lets_on_failure: options
                .clear_lets_on_failure
                .unwrap_or(settings.clear_lets_on_failure),
            flaky_spec_detection: settings.flaky_spec_detection_enabled,
            verbose_retry: settings.verbose_retry,
            display_try_failure_messages: settings.display_try_failure_messages,
        }
    }

    /// Maximum number of executions the budget allows
    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }
}

/// Negative counts mean "no retries"; the upper bound keeps `count + 1`
/// representable.
pub fn clamp_retry_count(raw: i64) -> u32 {
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX).min(u32::MAX - 1)
}

#[cfg(test)]
mod tests {
    use rebound_domain::{Failure, Metadata, RetryOptions};

    use super::*;
    use crate::retry::ports::{FixedRetryCount, NoOverride};

    struct StubTest {
        metadata: Metadata,
    }

    impl StubTest {
        fn with_options(options: RetryOptions) -> Self {
            Self { metadata: Metadata::new().with_options(options) }
        }
    }

    impl TestCase for StubTest {
        fn id(&self) -> &str {
            "stub"
        }

        fn location(&self) -> &str {
            "./stub_spec.rb:1"
        }

        fn metadata(&self) -> &Metadata {
            &self.metadata
        }

        fn metadata_mut(&mut self) -> &mut Metadata {
            &mut self.metadata
        }

        fn execute(&mut self) {}

        fn last_failure(&self) -> Option<&Failure> {
            None
        }

        fn clear_last_failure(&mut self) {}

        fn set_last_failure(&mut self, _failure: Option<Failure>) {}

        fn reset_shared_fixtures(&mut self) {}
    }

    #[test]
    fn test_retry_count_priority() {
        let config = ReboundConfig::new()
            .with_default_retry_count(1)
            .with_retry_count_condition(|_| Some(7));
        let test = StubTest::with_options(RetryOptions::new().with_retry(2));

        assert_eq!(EffectivePolicy::resolve(&config, &test, &FixedRetryCount(3)).retry_count, 3);
        assert_eq!(EffectivePolicy::resolve(&config, &test, &NoOverride).retry_count, 2);

        let untagged = StubTest::with_options(RetryOptions::new());
        assert_eq!(EffectivePolicy::resolve(&config, &untagged, &NoOverride).retry_count, 7);

        let plain = ReboundConfig::new().with_default_retry_count(1);
        assert_eq!(EffectivePolicy::resolve(&plain, &untagged, &NoOverride).retry_count, 1);
    }

    #[test]
    fn test_condition_sees_test_tags() {
        let config = ReboundConfig::new().with_retry_count_condition(|test| {
            test.metadata().tag("js").and_then(|v| v.as_bool()).filter(|js| *js).map(|_| 3)
        });
        let mut test = StubTest::with_options(RetryOptions::new());
        test.metadata.set_tag("js", true);

        assert_eq!(EffectivePolicy::resolve(&config, &test, &NoOverride).retry_count, 3);
    }

    #[test]
    fn test_negative_count_clamps_to_zero() {
        let test = StubTest::with_options(RetryOptions::new().with_retry(-4));
        let policy = EffectivePolicy::resolve(&ReboundConfig::new(), &test, &NoOverride);
        assert_eq!(policy.retry_count, 0);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(clamp_retry_count(i64::MAX), u32::MAX - 1);
    }

    #[test]
    fn test_lists_and_flags_fall_back_to_config() {
        let config = ReboundConfig::new()
            .with_exceptions_to_retry(vec![Matcher::from("Timeout")])
            .with_clear_lets_on_failure(true);
        let test = StubTest::with_options(
            RetryOptions::new()
                .with_exceptions_to_hard_fail(vec![Matcher::from("Fatal")])
                .with_clear_lets_on_failure(false),
        );

        let policy = EffectivePolicy::resolve(&config, &test, &NoOverride);
        assert_eq!(policy.exceptions_to_hard_fail.len(), 1);
        assert_eq!(policy.exceptions_to_retry.len(), 1);
        assert!(!policy.clear_lets_on_failure);
    }

    #[test]
    fn test_fixed_wait_prefers_metadata() {
        let config = ReboundConfig::new().with_default_sleep_interval(Duration::from_millis(5));
        let test =
            StubTest::with_options(RetryOptions::new().with_retry_wait(Duration::from_millis(20)));

        let policy = EffectivePolicy::resolve(&config, &test, &NoOverride);
        assert_eq!(policy.sleep, SleepSchedule::Fixed(Duration::from_millis(20)));
        assert_eq!(policy.sleep.interval(3), Duration::from_millis(20));
    }

    #[test]
    fn test_exponential_schedule_doubles_per_attempt() {
        let config = ReboundConfig::new().with_exponential_backoff(true);
        let test =
            StubTest::with_options(RetryOptions::new().with_retry_wait(Duration::from_millis(10)));

        let policy = EffectivePolicy::resolve(&config, &test, &NoOverride);
        let waits: Vec<_> = (1..=4).map(|a| policy.sleep.interval(a)).collect();
        assert_eq!(
            waits,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(40),
                Duration::from_millis(80),
            ]
        );
    }

    #[test]
    fn test_metadata_can_disable_global_backoff() {
        let config = ReboundConfig::new()
            .with_exponential_backoff(true)
            .with_default_sleep_interval(Duration::from_millis(3));
        let test = StubTest::with_options(RetryOptions::new().with_exponential_backoff(false));

        let policy = EffectivePolicy::resolve(&config, &test, &NoOverride);
        assert_eq!(policy.sleep, SleepSchedule::Fixed(Duration::from_millis(3)));
    }

    #[test]
    fn test_exponential_schedule_saturates() {
        let schedule = SleepSchedule::Exponential { base: Duration::from_secs(u64::MAX / 2) };
        assert_eq!(schedule.interval(200), Duration::MAX);
        assert_eq!(schedule.interval(0), Duration::from_secs(u64::MAX / 2));
    }
}
