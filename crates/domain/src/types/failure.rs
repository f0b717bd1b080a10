//! Failures raised by test executions
//!
//! A failure carries a [`FailureKind`], which records the failure's own type
//! name followed by its ancestors. Matchers use the lineage to decide subtype
//! relationships without runtime reflection.

use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::AGGREGATE_FAILURE_KIND;

/// Type identity of a failure, most specific name first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FailureKind {
    lineage: Vec<String>,
}

impl FailureKind {
    /// A kind with no ancestors
    pub fn new(name: impl Into<String>) -> Self {
        Self { lineage: vec![name.into()] }
    }

    /// A kind deriving from `parent` (and transitively from its ancestors)
    pub fn child_of(parent: &FailureKind, name: impl Into<String>) -> Self {
        let mut lineage = Vec::with_capacity(parent.lineage.len() + 1);
        lineage.push(name.into());
        lineage.extend(parent.lineage.iter().cloned());
        Self { lineage }
    }

    /// Kind named after a Rust type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// The most specific name
    pub fn name(&self) -> &str {
        self.lineage.first().map_or("", String::as_str)
    }

    /// Ancestor names, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        self.lineage.iter().skip(1).map(String::as_str)
    }

    /// True when this kind is `name` or derives from it
    pub fn is_a(&self, name: &str) -> bool {
        self.lineage.iter().any(|entry| entry == name)
    }

    /// True only when the most specific name is `name`
    pub fn is_exactly(&self, name: &str) -> bool {
        self.name() == name
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure observed after a test execution
///
/// Aggregate failures (several assertion failures collected by one run) keep
/// their members in `sub_failures`; reporting expands them.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_failures: Vec<Failure>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), sub_failures: Vec::new() }
    }

    /// Capture a Rust error; its type name becomes the failure kind
    pub fn from_error<E: StdError + 'static>(error: &E) -> Self {
        Self::new(FailureKind::of::<E>(), error.to_string())
    }

    /// Bundle several failures raised by one execution
    pub fn aggregate(failures: Vec<Failure>) -> Self {
        let message = format!("Got {} failures", failures.len());
        Self { kind: FailureKind::new(AGGREGATE_FAILURE_KIND), message, sub_failures: failures }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sub_failures(&self) -> &[Failure] {
        &self.sub_failures
    }

    pub fn is_aggregate(&self) -> bool {
        !self.sub_failures.is_empty()
    }

    /// Messages to report for this failure
    ///
    /// An aggregate yields one message per member, anything else yields its
    /// own message.
    pub fn report_lines(&self) -> Vec<&str> {
        if self.is_aggregate() {
            self.sub_failures.iter().map(Failure::message).collect()
        } else {
            vec![self.message()]
        }
    }
}
