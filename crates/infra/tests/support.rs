//! Shared helpers for `rebound-infra` integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rebound_core::TestCase;
use rebound_domain::{Failure, FailureKind, Metadata, RetryOptions};

/// Serializes tests that touch process environment variables.
pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Test double failing a fixed number of times before passing.
pub struct FlakyTest {
    metadata: Metadata,
    failures_left: u32,
    last_failure: Option<Failure>,
    pub executions: u32,
}

impl FlakyTest {
    pub fn new(failures: u32, options: RetryOptions) -> Self {
        Self {
            metadata: Metadata::new().with_options(options),
            failures_left: failures,
            last_failure: None,
            executions: 0,
        }
    }
}

impl TestCase for FlakyTest {
    fn id(&self) -> &str {
        "checkout_spec.rb[1:1]"
    }

    fn location(&self) -> &str {
        "./spec/checkout_spec.rb:4"
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn execute(&mut self) {
        self.executions += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            self.last_failure =
                Some(Failure::new(FailureKind::new("Timeout"), "payment gateway timed out"));
        }
    }

    fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    fn clear_last_failure(&mut self) {
        self.last_failure = None;
    }

    fn set_last_failure(&mut self, failure: Option<Failure>) {
        self.last_failure = failure;
    }

    fn reset_shared_fixtures(&mut self) {}
}
