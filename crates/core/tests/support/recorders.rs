//! Recording reporter and retry listener.

use parking_lot::Mutex;
use rebound_core::{Reporter, RetryListener, TestCase};
use rebound_domain::AttemptState;

/// Reporter keeping every message in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Reporter for RecordingReporter {
    fn message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Listener recording `(test id, attempts so far)` for every retry
#[derive(Debug, Default)]
pub struct RecordingListener {
    calls: Mutex<Vec<(String, u32)>>,
}

impl RecordingListener {
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().clone()
    }
}

impl RetryListener for RecordingListener {
    fn on_retry(&self, test: &dyn TestCase, state: &AttemptState) {
        self.calls.lock().push((test.id().to_string(), state.attempts()));
    }
}
