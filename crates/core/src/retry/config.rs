//! Global retry configuration
//!
//! [`RetrySettings`] holds the plain, serializable options a host can load
//! from files or the environment. [`ReboundConfig`] adds what cannot be
//! serialized: matcher predicates, the retry-count condition, callbacks and
//! retry listeners.
//!
//! The host shares one configuration through [`SharedConfig`] and may change
//! it between test runs. The orchestrator takes a snapshot at every loop
//! start.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rebound_common::duration_millis;
use rebound_domain::constants::{DEFAULT_CLEAR_LETS_ON_FAILURE, DEFAULT_RETRY_COUNT};
use rebound_domain::{AttemptState, Matcher};
use serde::{Deserialize, Serialize};

use super::ports::{RetryListener, TestCase};

/// Callback receiving the test handle and the loop state
pub type TestCallback = Arc<dyn Fn(&mut dyn TestCase, &AttemptState) + Send + Sync>;

/// Dynamic per-test retry count
pub type RetryCountCondition = Arc<dyn Fn(&dyn TestCase) -> Option<i64> + Send + Sync>;

/// Configuration shared between the host and the orchestrator
pub type SharedConfig = Arc<RwLock<ReboundConfig>>;

/// Serializable global options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Emit an "Nth try" message before every retry
    pub verbose_retry: bool,
    pub default_retry_count: i64,
    #[serde(rename = "default_sleep_interval_ms", with = "duration_millis")]
    pub default_sleep_interval: Duration,
    /// Backoff mode for tests that do not choose one
    pub exponential_backoff: bool,
    pub clear_lets_on_failure: bool,
    pub display_try_failure_messages: bool,
    /// Require a confirmation pass before trusting a first-retry success
    pub flaky_spec_detection_enabled: bool,
    /// Failure kind names, matched as subtypes
    pub exceptions_to_hard_fail: Vec<String>,
    /// Failure kind names, matched as subtypes
    pub exceptions_to_retry: Vec<String>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            verbose_retry: false,
            default_retry_count: DEFAULT_RETRY_COUNT,
            default_sleep_interval: Duration::ZERO,
            exponential_backoff: false,
            clear_lets_on_failure: DEFAULT_CLEAR_LETS_ON_FAILURE,
            display_try_failure_messages: false,
            flaky_spec_detection_enabled: false,
            exceptions_to_hard_fail: Vec::new(),
            exceptions_to_retry: Vec::new(),
        }
    }
}

/// Complete global configuration
///
/// The matcher lists here are authoritative. Building from settings turns
/// each configured kind name into a [`Matcher::SubtypeOf`].
#[derive(Clone, Default)]
pub struct ReboundConfig {
    pub settings: RetrySettings,
    pub exceptions_to_hard_fail: Vec<Matcher>,
    pub exceptions_to_retry: Vec<Matcher>,
    pub retry_count_condition: Option<RetryCountCondition>,
    /// Invoked between attempts, after fixtures are reset
    pub retry_callback: Option<TestCallback>,
    /// Invoked when a test passes after at least one failure
    pub flaky_test_callback: Option<TestCallback>,
    /// Invoked between attempts once a success has been overridden
    pub flaky_spec_detection: Option<TestCallback>,
    pub listeners: Vec<Arc<dyn RetryListener>>,
}

impl ReboundConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: RetrySettings) -> Self {
        let exceptions_to_hard_fail =
            settings.exceptions_to_hard_fail.iter().map(String::as_str).map(Matcher::from).collect();
        let exceptions_to_retry =
            settings.exceptions_to_retry.iter().map(String::as_str).map(Matcher::from).collect();

        Self { settings, exceptions_to_hard_fail, exceptions_to_retry, ..Self::default() }
    }

    /// Wrap into a handle shareable with the orchestrator
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }

    pub fn with_verbose_retry(mut self, enabled: bool) -> Self {
        self.settings.verbose_retry = enabled;
        self
    }

    pub fn with_default_retry_count(mut self, count: i64) -> Self {
        self.settings.default_retry_count = count;
        self
    }

    pub fn with_default_sleep_interval(mut self, interval: Duration) -> Self {
        self.settings.default_sleep_interval = interval;
        self
    }

    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.settings.exponential_backoff = enabled;
        self
    }

    pub fn with_clear_lets_on_failure(mut self, enabled: bool) -> Self {
        self.settings.clear_lets_on_failure = enabled;
        self
    }

    pub fn with_display_try_failure_messages(mut self, enabled: bool) -> Self {
        self.settings.display_try_failure_messages = enabled;
        self
    }

    pub fn with_flaky_spec_detection_enabled(mut self, enabled: bool) -> Self {
        self.settings.flaky_spec_detection_enabled = enabled;
        self
    }

    pub fn with_exceptions_to_hard_fail(mut self, matchers: Vec<Matcher>) -> Self {
        self.exceptions_to_hard_fail = matchers;
        self
    }

    pub fn with_exceptions_to_retry(mut self, matchers: Vec<Matcher>) -> Self {
        self.exceptions_to_retry = matchers;
        self
    }

    pub fn with_retry_count_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&dyn TestCase) -> Option<i64> + Send + Sync + 'static,
    {
        self.retry_count_condition = Some(Arc::new(condition));
        self
    }

    pub fn with_retry_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut dyn TestCase, &AttemptState) + Send + Sync + 'static,
    {
        self.retry_callback = Some(Arc::new(callback));
        self
    }

    pub fn with_flaky_test_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut dyn TestCase, &AttemptState) + Send + Sync + 'static,
    {
        self.flaky_test_callback = Some(Arc::new(callback));
        self
    }

    pub fn with_flaky_spec_detection<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut dyn TestCase, &AttemptState) + Send + Sync + 'static,
    {
        self.flaky_spec_detection = Some(Arc::new(callback));
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn RetryListener>) -> Self {
        self.listeners.push(listener);
        self
    }
}

impl fmt::Debug for ReboundConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReboundConfig")
            .field("settings", &self.settings)
            .field("exceptions_to_hard_fail", &self.exceptions_to_hard_fail)
            .field("exceptions_to_retry", &self.exceptions_to_retry)
            .field("retry_count_condition", &self.retry_count_condition.is_some())
            .field("retry_callback", &self.retry_callback.is_some())
            .field("flaky_test_callback", &self.flaky_test_callback.is_some())
            .field("flaky_spec_detection", &self.flaky_spec_detection.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
