//! Time doubles for deterministic tests
//!
//! [`RecordingSleeper`] remembers every wait it was asked for and returns
//! immediately, so backoff schedules can be asserted without real delays.

// Test utilities panic on a poisoned mutex to fail tests early
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::time::Sleeper;

/// Sleeper that records requested durations instead of waiting
///
/// Clones share the same record, so a clone can be handed to the code under
/// test while the original is kept for assertions.
///
/// ```
/// use std::time::Duration;
///
/// use rebound_common::testing::RecordingSleeper;
/// use rebound_common::time::Sleeper;
///
/// let sleeper = RecordingSleeper::new();
/// let handle = sleeper.clone();
/// handle.sleep(Duration::from_millis(10));
/// handle.sleep(Duration::from_millis(20));
///
/// assert_eq!(sleeper.count(), 2);
/// assert_eq!(sleeper.total(), Duration::from_millis(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    requests: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create a sleeper with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested duration, in call order
    #[must_use]
    pub fn requests(&self) -> Vec<Duration> {
        self.requests.lock().expect("mutex poisoned").clone()
    }

    /// Number of sleep calls
    #[must_use]
    pub fn count(&self) -> usize {
        self.requests.lock().expect("mutex poisoned").len()
    }

    /// Sum of all requested durations
    #[must_use]
    pub fn total(&self) -> Duration {
        self.requests.lock().expect("mutex poisoned").iter().sum()
    }

    /// Forget everything recorded so far
    pub fn reset(&self) {
        self.requests.lock().expect("mutex poisoned").clear();
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.requests.lock().expect("mutex poisoned").push(duration);
    }
}
