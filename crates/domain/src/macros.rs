//! Macro for implementing Display and FromStr for label enums
//!
//! Enums that surface in logs and configuration (termination reasons, for
//! instance) share one lowercase string form. The macro generates both
//! directions from a single mapping.
//!
//! # Example
//!
//! ```rust
//! use rebound_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Verdict {
//!     Passed,
//!     Failed,
//! }
//!
//! impl_label_conversions!(Verdict {
//!     Passed => "passed",
//!     Failed => "failed",
//! });
//!
//! assert_eq!(Verdict::Failed.to_string(), "failed");
//! assert_eq!("PASSED".parse::<Verdict>(), Ok(Verdict::Passed));
//! ```

/// Implements Display and case-insensitive FromStr for a fieldless enum
///
/// Parse errors read `Invalid {Enum}: {input}`.
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
