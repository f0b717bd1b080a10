//! Time abstractions for the retry loop
//!
//! The only suspension point of a retry loop is the wait between attempts.
//! Routing it through [`Sleeper`] keeps production behaviour (a real, blocking
//! wall-clock wait) while letting tests observe requested delays without
//! waiting.
//!
//! ```
//! use std::time::Duration;
//!
//! use rebound_common::time::{Sleeper, ThreadSleeper};
//!
//! let sleeper = ThreadSleeper;
//! sleeper.sleep(Duration::ZERO);
//! ```

use std::sync::Arc;
use std::time::Duration;

/// Blocking wait between attempts
pub trait Sleeper: Send + Sync {
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`]
///
/// The wait is not interruptible by the engine; only the process can cut it
/// short.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<T: Sleeper + ?Sized> Sleeper for Arc<T> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

impl<T: Sleeper + ?Sized> Sleeper for Box<T> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_thread_sleeper_waits_at_least_requested_duration() {
        let start = Instant::now();
        ThreadSleeper.sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_arc_sleeper_delegates() {
        let sleeper: Arc<dyn Sleeper> = Arc::new(ThreadSleeper);
        sleeper.sleep(Duration::ZERO);
    }
}
