//! Reporter message formatting

use rebound_domain::constants::MESSAGE_PREFIX;
use rebound_domain::Failure;

/// English ordinal of `number`: 1st, 2nd, 3rd, 4th, 11th, 21st, 111th
pub fn ordinalize(number: u64) -> String {
    let suffix = if (11..=13).contains(&(number % 100)) {
        "th"
    } else {
        match number % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{number}{suffix}")
}

/// Message announcing execution `attempts + 1`
///
/// The first retry gets a leading newline to separate it from the output of
/// the initial failure.
pub fn retry_message(attempts: u32, location: &str) -> String {
    let message =
        format!("{MESSAGE_PREFIX}: {} try {location}", ordinalize(u64::from(attempts) + 1));
    if attempts == 1 {
        format!("\n{message}")
    } else {
        message
    }
}

/// Block describing the failure of execution `attempts`
///
/// Returns `None` for the last execution the budget allows, whose failure is
/// reported by the test framework itself.
pub fn try_failure_message(
    attempts: u32,
    retry_count: u32,
    location: &str,
    failure: &Failure,
) -> Option<String> {
    if u64::from(attempts) == u64::from(retry_count) + 1 {
        return None;
    }

    let lines = failure.report_lines().join("\n");
    Some(format!("\n{} Try error in {location}:\n{lines}\n", ordinalize(u64::from(attempts))))
}
