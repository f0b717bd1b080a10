//! Shared test helpers for `rebound-core` integration tests.
//!
//! These helpers provide a scripted test double and recording collaborators
//! so that orchestrator tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod recorders;
pub mod scripted;

use std::sync::Arc;

use rebound_common::testing::RecordingSleeper;
use rebound_core::{ReboundConfig, RetryOrchestrator};
use rebound_domain::{Failure, FailureKind};

pub use recorders::{RecordingListener, RecordingReporter};
pub use scripted::ScriptedTest;

/// Orchestrator wired to recording collaborators
pub struct Harness {
    pub orchestrator: RetryOrchestrator,
    pub reporter: Arc<RecordingReporter>,
    pub sleeper: RecordingSleeper,
}

impl Harness {
    pub fn new(config: ReboundConfig) -> Self {
        let reporter = Arc::new(RecordingReporter::default());
        let sleeper = RecordingSleeper::new();
        let orchestrator = RetryOrchestrator::new(config.into_shared(), reporter.clone())
            .with_sleeper(Arc::new(sleeper.clone()));
        Self { orchestrator, reporter, sleeper }
    }
}

/// Failure of a kind without ancestors
pub fn failure(kind: &str, message: &str) -> Failure {
    Failure::new(FailureKind::new(kind), message)
}

/// `Timeout < NetworkError < StandardError`
pub fn timeout_failure() -> Failure {
    let standard = FailureKind::new("StandardError");
    let network = FailureKind::child_of(&standard, "NetworkError");
    Failure::new(FailureKind::child_of(&network, "Timeout"), "read timed out")
}
