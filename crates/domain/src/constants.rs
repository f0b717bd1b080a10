//! Domain constants
//!
//! Centralized location for constants shared by the engine and its adapters.

/// Environment variable that forces a retry count for every test
pub const RETRY_COUNT_OVERRIDE_ENV: &str = "REBOUND_RETRY_COUNT";

/// Prefix of the "Nth try" reporter message
pub const MESSAGE_PREFIX: &str = "Rebound";

/// Kind name given to failures built with `Failure::aggregate`
pub const AGGREGATE_FAILURE_KIND: &str = "AggregateFailure";

/// Retry budget used when nothing else resolves one
pub const DEFAULT_RETRY_COUNT: i64 = 0;

/// Whether shared fixtures are reset between attempts by default
pub const DEFAULT_CLEAR_LETS_ON_FAILURE: bool = true;

/// Cap on the exponent of the exponential backoff, prevents overflow
pub const MAX_BACKOFF_EXPONENT: u32 = 30;

/// Metadata tag holding the number of executions performed before the
/// current one
pub const RETRY_ATTEMPTS_TAG: &str = "retry_attempts";
