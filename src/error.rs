//! Error types for Linty
//!
//! This module defines the error types used throughout Linty, following
//! a hierarchical structure with specific error variants for different
//! error categories. Rule execution faults have no variant here: the
//! orchestrator turns them into findings.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML in configuration file
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Target file could not be read
    #[error("Failed to read target file {path}: {source}")]
    UnreadableTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// No rule set is registered for the language identifier
    #[error("Unknown language: no rule set registered for '{0}'")]
    UnknownLanguage(String),

    /// Invalid rule definition
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    /// Rule set file could not be read
    #[error("Failed to read rule set {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Integrity-verification errors
///
/// These are failures to complete a Generate or Verify flow. A completed
/// verification that finds drift is reported as data, not as an error.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// A tracked engine file could not be read
    #[error("Failed to read tracked file {path}: {source}")]
    TrackedFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest artifact could not be read
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest artifact could not be written
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest record does not follow `name|hash`
    #[error("Malformed manifest record on line {line}: '{record}'")]
    MalformedRecord { line: usize, record: String },

    /// The tracked file list is empty or contains duplicates
    #[error("Invalid tracked file list: {0}")]
    InvalidTrackedFiles(String),
}

/// Top-level error type for Linty
#[derive(Debug, thiserror::Error)]
pub enum LintyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Integrity error
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
