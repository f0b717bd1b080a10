//! Configuration loader
//!
//! Loads [`RetrySettings`] from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Load a `.env` file from the working directory, if any
//! 2. Start from defaults, or from the first config file found by
//!    [`probe_config_paths`]
//! 3. Overlay every `REBOUND_*` environment variable that is set
//!
//! ## Environment Variables
//! - `REBOUND_VERBOSE_RETRY`: Announce every retry (true/false)
//! - `REBOUND_DEFAULT_RETRY_COUNT`: Retry budget for tests without one
//! - `REBOUND_DEFAULT_SLEEP_INTERVAL_MS`: Wait between attempts in milliseconds
//! - `REBOUND_EXPONENTIAL_BACKOFF`: Default backoff mode (true/false)
//! - `REBOUND_CLEAR_LETS_ON_FAILURE`: Reset shared fixtures between attempts
//! - `REBOUND_DISPLAY_TRY_FAILURE_MESSAGES`: Print each failed attempt
//! - `REBOUND_FLAKY_SPEC_DETECTION`: Require a confirmation pass
//! - `REBOUND_EXCEPTIONS_TO_HARD_FAIL`: Comma-separated failure kind names
//! - `REBOUND_EXCEPTIONS_TO_RETRY`: Comma-separated failure kind names
//!
//! `REBOUND_RETRY_COUNT` is not a setting: it is read on every loop start by
//! [`EnvRetryCountOverride`](crate::EnvRetryCountOverride).
//!
//! ## File Locations
//! The loader probes `rebound.toml`, `rebound.json` and
//! `.config/rebound.toml` in the working directory, then in its parent and
//! grandparent.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rebound_core::{ReboundConfig, RetrySettings};
use rebound_domain::{ReboundError, Result};

pub const VERBOSE_RETRY_ENV: &str = "REBOUND_VERBOSE_RETRY";
pub const DEFAULT_RETRY_COUNT_ENV: &str = "REBOUND_DEFAULT_RETRY_COUNT";
pub const DEFAULT_SLEEP_INTERVAL_ENV: &str = "REBOUND_DEFAULT_SLEEP_INTERVAL_MS";
pub const EXPONENTIAL_BACKOFF_ENV: &str = "REBOUND_EXPONENTIAL_BACKOFF";
pub const CLEAR_LETS_ON_FAILURE_ENV: &str = "REBOUND_CLEAR_LETS_ON_FAILURE";
pub const DISPLAY_TRY_FAILURE_MESSAGES_ENV: &str = "REBOUND_DISPLAY_TRY_FAILURE_MESSAGES";
pub const FLAKY_SPEC_DETECTION_ENV: &str = "REBOUND_FLAKY_SPEC_DETECTION";
pub const EXCEPTIONS_TO_HARD_FAIL_ENV: &str = "REBOUND_EXCEPTIONS_TO_HARD_FAIL";
pub const EXCEPTIONS_TO_RETRY_ENV: &str = "REBOUND_EXCEPTIONS_TO_RETRY";

const CONFIG_FILE_NAMES: [&str; 3] = ["rebound.toml", "rebound.json", ".config/rebound.toml"];

/// Load settings from `.env`, an optional config file and the environment
///
/// # Errors
/// Returns `ReboundError::Config` if a probed file cannot be parsed or an
/// environment variable holds an invalid value.
pub fn load() -> Result<RetrySettings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env file"),
    }

    let mut settings = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            RetrySettings::default()
        }
    };

    apply_env(&mut settings)?;
    Ok(settings)
}

/// [`load`], converted into a full configuration without callbacks
///
/// # Errors
/// See [`load`].
pub fn load_config() -> Result<ReboundConfig> {
    load().map(ReboundConfig::from_settings)
}

/// Load settings from environment variables only
///
/// Unset variables keep their defaults.
///
/// # Errors
/// Returns `ReboundError::Config` naming the first variable with an invalid
/// value.
pub fn load_from_env() -> Result<RetrySettings> {
    let mut settings = RetrySettings::default();
    apply_env(&mut settings)?;
    tracing::debug!("Retry settings loaded from environment variables");
    Ok(settings)
}

/// Load settings from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected by
/// extension (`.toml` or `.json`); missing keys keep their defaults.
///
/// # Errors
/// Returns `ReboundError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<RetrySettings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReboundError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReboundError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading retry settings from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReboundError::Config(format!("Failed to read config file: {e}")))?;

    parse_settings(&contents, &config_path)
}

fn parse_settings(contents: &str, path: &Path) -> Result<RetrySettings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReboundError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReboundError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ReboundError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(3)
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.is_file())
}

fn apply_env(settings: &mut RetrySettings) -> Result<()> {
    if let Some(value) = env_bool(VERBOSE_RETRY_ENV)? {
        settings.verbose_retry = value;
    }
    if let Some(value) = env_parse::<i64>(DEFAULT_RETRY_COUNT_ENV)? {
        settings.default_retry_count = value;
    }
    if let Some(millis) = env_parse::<u64>(DEFAULT_SLEEP_INTERVAL_ENV)? {
        settings.default_sleep_interval = Duration::from_millis(millis);
    }
    if let Some(value) = env_bool(EXPONENTIAL_BACKOFF_ENV)? {
        settings.exponential_backoff = value;
    }
    if let Some(value) = env_bool(CLEAR_LETS_ON_FAILURE_ENV)? {
        settings.clear_lets_on_failure = value;
    }
    if let Some(value) = env_bool(DISPLAY_TRY_FAILURE_MESSAGES_ENV)? {
        settings.display_try_failure_messages = value;
    }
    if let Some(value) = env_bool(FLAKY_SPEC_DETECTION_ENV)? {
        settings.flaky_spec_detection_enabled = value;
    }
    if let Some(names) = env_list(EXCEPTIONS_TO_HARD_FAIL_ENV) {
        settings.exceptions_to_hard_fail = names;
    }
    if let Some(names) = env_list(EXCEPTIONS_TO_RETRY_ENV) {
        settings.exceptions_to_retry = names;
    }
    Ok(())
}

/// Parse a numeric environment variable, `None` when unset
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ReboundError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse a boolean environment variable, `None` when unset
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive)
fn env_bool(key: &str) -> Result<Option<bool>> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ReboundError::Config(format!("Invalid boolean for {key}: {raw}"))),
    }
}

/// Comma-separated list, blanks dropped
fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|raw| {
        raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
    })
}
