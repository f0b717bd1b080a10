//! Failure matchers for hard-fail and retry lists

use std::fmt;
use std::sync::Arc;

use super::failure::{Failure, FailureKind};

/// Custom acceptance test for a failure
pub type FailurePredicate = Arc<dyn Fn(&Failure) -> bool + Send + Sync>;

/// Criterion a failure is tested against
#[derive(Clone)]
pub enum Matcher {
    /// Accepts only failures whose most specific kind is the given name
    ExactType(String),
    /// Accepts failures of the given kind or any kind deriving from it
    SubtypeOf(String),
    /// Accepts failures the predicate returns true for
    Predicate(FailurePredicate),
}

impl Matcher {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::ExactType(name.into())
    }

    pub fn subtype_of(name: impl Into<String>) -> Self {
        Self::SubtypeOf(name.into())
    }

    /// Subtype matcher for failures captured with `Failure::from_error::<E>`
    pub fn of<E: ?Sized + 'static>() -> Self {
        Self::SubtypeOf(std::any::type_name::<E>().to_string())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Failure) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn matches(&self, failure: &Failure) -> bool {
        match self {
            Self::ExactType(name) => failure.kind().is_exactly(name),
            Self::SubtypeOf(name) => failure.kind().is_a(name),
            Self::Predicate(predicate) => predicate(failure),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactType(name) => f.debug_tuple("ExactType").field(name).finish(),
            Self::SubtypeOf(name) => f.debug_tuple("SubtypeOf").field(name).finish(),
            Self::Predicate(_) => f.write_str("Predicate(<function>)"),
        }
    }
}

impl From<&str> for Matcher {
    fn from(name: &str) -> Self {
        Self::SubtypeOf(name.to_string())
    }
}

impl From<String> for Matcher {
    fn from(name: String) -> Self {
        Self::SubtypeOf(name)
    }
}

impl From<&FailureKind> for Matcher {
    fn from(kind: &FailureKind) -> Self {
        Self::SubtypeOf(kind.name().to_string())
    }
}

/// True when `failure` is present and at least one matcher accepts it
pub fn matches_any(matchers: &[Matcher], failure: Option<&Failure>) -> bool {
    failure.is_some_and(|failure| matchers.iter().any(|matcher| matcher.matches(failure)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_failure() -> Failure {
        let base = FailureKind::new("StandardError");
        let network = FailureKind::child_of(&base, "NetworkError");
        Failure::new(FailureKind::child_of(&network, "ConnectionReset"), "peer reset")
    }

    #[test]
    fn test_subtype_matches_ancestor() {
        let failure = network_failure();
        assert!(Matcher::subtype_of("NetworkError").matches(&failure));
        assert!(Matcher::from("ConnectionReset").matches(&failure));
        assert!(!Matcher::subtype_of("Timeout").matches(&failure));
    }

    #[test]
    fn test_exact_ignores_ancestors() {
        let failure = network_failure();
        assert!(Matcher::exact("ConnectionReset").matches(&failure));
        assert!(!Matcher::exact("NetworkError").matches(&failure));
    }

    #[test]
    fn test_predicate_sees_message() {
        let matcher = Matcher::predicate(|failure| failure.message().contains("reset"));
        assert!(matcher.matches(&network_failure()));
        assert_eq!(format!("{matcher:?}"), "Predicate(<function>)");
    }

    #[test]
    fn test_matches_any_requires_a_failure() {
        let matchers = vec![Matcher::subtype_of("StandardError")];
        assert!(matches_any(&matchers, Some(&network_failure())));
        assert!(!matches_any(&matchers, None));
        assert!(!matches_any(&[], Some(&network_failure())));
    }
}
