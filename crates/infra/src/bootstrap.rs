//! Wiring for hosts that configure Rebound from the environment

use std::sync::Arc;

use rebound_common::observability::init_tracing;
use rebound_core::{Reporter, RetryOrchestrator};
use rebound_domain::Result;

use crate::config;
use crate::env_override::EnvRetryCountOverride;

/// Orchestrator configured from `.env`, config files and `REBOUND_*`
/// variables, with the `REBOUND_RETRY_COUNT` override installed
///
/// # Errors
/// Returns `ReboundError::Config` when the configuration cannot be loaded.
pub fn orchestrator_from_env(reporter: Arc<dyn Reporter>) -> Result<RetryOrchestrator> {
    let config = config::load_config()?;
    tracing::debug!(settings = ?config.settings, "Retry configuration loaded");

    Ok(RetryOrchestrator::new(config.into_shared(), reporter)
        .with_retry_count_override(Arc::new(EnvRetryCountOverride::new())))
}

/// Install the default `fmt` subscriber, see [`init_tracing`]
pub fn init_logging() -> bool {
    init_tracing(None)
}
