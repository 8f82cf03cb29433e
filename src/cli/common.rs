//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration and
//! building the rule registry.

use crate::config::Config;
use crate::error::{ConfigError, RuleError};
use crate::rules::RuleRegistry;
use std::path::Path;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_MISMATCH: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Load the configuration file, or defaults when it does not exist
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or is invalid.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    Config::load_or_default(path)
}

/// Build rule registry from configuration
///
/// This function:
/// 1. Loads the embedded built-in rule sets
/// 2. Loads custom rule sets from `rules_dir` (if configured), overriding
///    built-in sets of the same language
///
/// # Errors
///
/// Returns `RuleError` if there is an error loading or building rules.
pub(crate) fn build_registry(config: &Config) -> Result<RuleRegistry, RuleError> {
    let mut registry = RuleRegistry::with_builtin()?;
    if let Some(dir) = &config.linty.rules_dir {
        registry.load_custom_rule_sets(dir)?;
    }
    Ok(registry)
}
