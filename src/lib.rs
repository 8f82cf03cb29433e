#![forbid(unsafe_code)]

//! Linty: pluggable per-file static checking
//!
//! Linty runs a language's rule set against a single source file and reports
//! findings. A rule that errors or panics is reported as a fault finding
//! instead of aborting the run. The engine can verify its own source files
//! against an MD5 manifest before trusting a report.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod integrity;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, IntegrityError, LintyError, RuleError};

// Re-export core domain types for convenient access
pub use engine::{LintOrchestrator, LintReport};
pub use integrity::{IntegrityVerifier, Manifest, Mismatch};
pub use rules::{Finding, Rule, RuleRegistry, Target};
pub use types::{GlobPattern, HashAlgorithm, LanguageId};
