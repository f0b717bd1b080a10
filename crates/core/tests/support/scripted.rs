//! Scripted `TestCase` double.
//!
//! Each execution consumes the next scripted outcome. Once the script is
//! exhausted the fallback outcome repeats forever.

use rebound_core::TestCase;
use rebound_domain::constants::RETRY_ATTEMPTS_TAG;
use rebound_domain::{Failure, Metadata, RetryOptions};

#[derive(Debug, Clone)]
pub struct ScriptedTest {
    id: String,
    location: String,
    metadata: Metadata,
    script: Vec<Option<Failure>>,
    fallback: Option<Failure>,
    last_failure: Option<Failure>,
    pub executions: u32,
    pub fixture_resets: u32,
    /// Value of the attempts tag seen by each execution
    pub observed_attempts: Vec<u64>,
}

impl ScriptedTest {
    /// Test producing the given outcomes in order, then passing
    pub fn scripted(outcomes: Vec<Option<Failure>>) -> Self {
        Self {
            id: "login_spec.rb[1:2]".to_string(),
            location: "./spec/login_spec.rb:12".to_string(),
            metadata: Metadata::new(),
            script: outcomes,
            fallback: None,
            last_failure: None,
            executions: 0,
            fixture_resets: 0,
            observed_attempts: Vec::new(),
        }
    }

    pub fn always_failing(failure: Failure) -> Self {
        let mut test = Self::scripted(Vec::new());
        test.fallback = Some(failure);
        test
    }

    pub fn failing_then_passing(failures: usize, failure: Failure) -> Self {
        Self::scripted(vec![Some(failure); failures])
    }

    pub fn passing() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn with_options(mut self, options: RetryOptions) -> Self {
        self.metadata.options = options;
        self
    }

    pub fn with_tag(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.set_tag(key, value);
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }
}

impl TestCase for ScriptedTest {
    fn id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn execute(&mut self) {
        let index = self.executions as usize;
        self.executions += 1;

        if let Some(seen) = self.metadata.tag(RETRY_ATTEMPTS_TAG).and_then(|v| v.as_u64()) {
            self.observed_attempts.push(seen);
        }

        self.last_failure = match self.script.get(index) {
            Some(outcome) => outcome.clone(),
            None => self.fallback.clone(),
        };
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

    fn reset_shared_fixtures(&mut self) {
        self.fixture_resets += 1;
    }
}
