//! Configuration loading and management
//!
//! This module provides utilities for loading retry settings from environment
//! variables, `.env` files and configuration files.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_config, load_from_env, load_from_file, probe_config_paths};
