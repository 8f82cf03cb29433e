#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing rules

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Error raised by a rule's check function
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single check invocation
pub type CheckResult = Result<Vec<Finding>, CheckError>;

/// The unit of work for one run: one file and its full text
///
/// A Target is immutable once constructed and shared read-only by every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    file: PathBuf,
    content: String,
}

impl Target {
    /// Creates a Target from an identifier and in-memory content
    pub fn new(file: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content: content.into(),
        }
    }

    /// Reads a Target from disk
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD so files carrying a
    /// stray Latin-1 byte are still checked.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnreadableTarget` if the file is missing or
    /// cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::UnreadableTarget {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::new(path, content))
    }

    /// Identifier of the file under check
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Full text of the file
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Iterates over `(line_number, line)` pairs, 1-based, split on `\n`
    ///
    /// A trailing newline yields a final empty line, matching a plain
    /// `\n` split of the content.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.content
            .split('\n')
            .enumerate()
            .map(|(index, line)| (index as u32 + 1, line))
    }
}

/// One reported outcome: a detected issue or a rule-execution fault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// File the finding belongs to; always the Target's file
    pub file: PathBuf,

    /// Line number (1-indexed), absent for file-level findings and faults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Human-readable issue description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Whether the check passed
    pub passed: bool,

    /// Set when the finding records a rule-execution fault
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Finding {
    /// A failed check at a specific line
    pub fn issue(file: &Path, line: u32, issue: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line: Some(line),
            issue: Some(issue.into()),
            passed: false,
            error: None,
        }
    }

    /// The synthetic finding recorded when a rule's check raises
    pub fn fault(file: &Path, rule_name: &str, message: impl std::fmt::Display) -> Self {
        Self {
            file: file.to_path_buf(),
            line: None,
            issue: None,
            passed: false,
            error: Some(format!("Rule '{}' failed: {}", rule_name, message)),
        }
    }

    /// Returns true if this finding records a rule-execution fault
    pub fn is_fault(&self) -> bool {
        self.error.is_some()
    }
}

/// Trait that all rules must implement
///
/// Rules are stateless: the same rule instance may be applied to any number
/// of targets. Identity is the rule's name.
pub trait Rule: Send + Sync {
    /// Returns the name identifying this rule within its rule set
    fn name(&self) -> &str;

    /// Returns a human-readable description of what this rule checks
    fn description(&self) -> &str;

    /// Scans the target and returns findings in line-ascending order
    ///
    /// A rule may fail, by returning `Err` or by panicking; the orchestrator
    /// isolates either into a single fault finding.
    fn check(&self, target: &Target) -> CheckResult;
}
