//! Retry-count override read from the environment
//!
//! `REBOUND_RETRY_COUNT` forces the retry count of every test, ahead of
//! per-test metadata. The variable is read on every loop start so a host can
//! change it between tests.

use rebound_core::RetryCountOverride;
use rebound_domain::constants::RETRY_COUNT_OVERRIDE_ENV;
use tracing::warn;

/// [`RetryCountOverride`] backed by an environment variable
#[derive(Debug, Clone)]
pub struct EnvRetryCountOverride {
    key: String,
}

impl EnvRetryCountOverride {
    /// Read `REBOUND_RETRY_COUNT`
    pub fn new() -> Self {
        Self::with_key(RETRY_COUNT_OVERRIDE_ENV)
    }

    /// Read a custom variable
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for EnvRetryCountOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryCountOverride for EnvRetryCountOverride {
    fn retry_count(&self) -> Option<i64> {
        let raw = std::env::var(&self.key).ok()?;
        match leading_integer(&raw) {
            Some(count) => Some(count),
            None => {
                warn!(key = %self.key, value = %raw, "Retry count override is not a number, using 0");
                Some(0)
            }
        }
    }
}

/// Integer at the start of `raw`
///
/// Leading whitespace and one sign are allowed, parsing stops at the first
/// non-digit. Returns `None` when no digit is found. Out-of-range values
/// saturate.
pub fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut seen_digit = false;
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}
