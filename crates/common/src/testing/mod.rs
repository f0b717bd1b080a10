//! Testing utilities and helpers
//!
//! - **[`time`]**: deterministic [`Sleeper`](crate::time::Sleeper) doubles
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use rebound_common::testing::RecordingSleeper;
//! use rebound_common::time::Sleeper;
//!
//! let sleeper = RecordingSleeper::new();
//! sleeper.sleep(Duration::from_millis(20));
//! assert_eq!(sleeper.requests(), vec![Duration::from_millis(20)]);
//! ```

pub mod time;

pub use time::RecordingSleeper;
