//! Domain types for the retry loop

pub mod attempt;
pub mod failure;
pub mod matcher;
pub mod metadata;

pub use attempt::{AttemptState, RetryOutcome, Termination};
pub use failure::{Failure, FailureKind};
pub use matcher::{matches_any, FailurePredicate, Matcher};
pub use metadata::{Metadata, RetryOptions};
