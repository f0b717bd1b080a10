//! Per-test metadata
//!
//! Retry options attached to a single test override the global settings for
//! that test only. Every option is optional: `None` means "not set here", so
//! resolution falls through to the next source.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use super::matcher::Matcher;

/// Retry options recognised on a test's metadata
#[derive(Debug, Clone, Default)]
pub struct RetryOptions {
    /// Retry budget; negative values clamp to zero
    pub retry: Option<i64>,
    /// Wait between attempts, also the base of the exponential backoff
    pub retry_wait: Option<Duration>,
    pub exponential_backoff: Option<bool>,
    pub clear_lets_on_failure: Option<bool>,
    pub exceptions_to_hard_fail: Option<Vec<Matcher>>,
    pub exceptions_to_retry: Option<Vec<Matcher>>,
}

impl RetryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry(mut self, retry: i64) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = Some(wait);
        self
    }

    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = Some(enabled);
        self
    }

    pub fn with_clear_lets_on_failure(mut self, enabled: bool) -> Self {
        self.clear_lets_on_failure = Some(enabled);
        self
    }

    pub fn with_exceptions_to_hard_fail(mut self, matchers: Vec<Matcher>) -> Self {
        self.exceptions_to_hard_fail = Some(matchers);
        self
    }

    pub fn with_exceptions_to_retry(mut self, matchers: Vec<Matcher>) -> Self {
        self.exceptions_to_retry = Some(matchers);
        self
    }

    /// Overlay `overrides`; every option it sets replaces the current value
    pub fn merge(&mut self, overrides: RetryOptions) {
        let RetryOptions {
            retry,
            retry_wait,
            exponential_backoff,
            clear_lets_on_failure,
            exceptions_to_hard_fail,
            exceptions_to_retry,
        } = overrides;

        if retry.is_some() {
            self.retry = retry;
        }
        if retry_wait.is_some() {
            self.retry_wait = retry_wait;
        }
        if exponential_backoff.is_some() {
            self.exponential_backoff = exponential_backoff;
        }
        if clear_lets_on_failure.is_some() {
            self.clear_lets_on_failure = clear_lets_on_failure;
        }
        if exceptions_to_hard_fail.is_some() {
            self.exceptions_to_hard_fail = exceptions_to_hard_fail;
        }
        if exceptions_to_retry.is_some() {
            self.exceptions_to_retry = exceptions_to_retry;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.retry.is_none()
            && self.retry_wait.is_none()
            && self.exponential_backoff.is_none()
            && self.clear_lets_on_failure.is_none()
            && self.exceptions_to_hard_fail.is_none()
            && self.exceptions_to_retry.is_none()
    }
}

/// Metadata of a single test: retry options plus free-form tags
///
/// Tags are opaque to the engine; hosts use them to carry data between
/// callbacks (a retry callback can read a tag set by the test itself).
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub options: RetryOptions,
    tags: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: RetryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.tags.insert(key.into(), value.into())
    }

    pub fn tag(&self, key: &str) -> Option<&Value> {
        self.tags.get(key)
    }

    pub fn tags(&self) -> &BTreeMap<String, Value> {
        &self.tags
    }

    /// Apply caller-supplied options on top of the stored ones
    pub fn merge_options(&mut self, overrides: RetryOptions) {
        self.options.merge(overrides);
    }
}
