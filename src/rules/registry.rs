#![forbid(unsafe_code)]

//! Rule registry for managing and resolving rule sets
//!
//! The RuleRegistry is responsible for:
//! - Loading the built-in rule sets embedded in the binary
//! - Loading custom rule sets from TOML files
//! - Resolving a language identifier to its ordered rule set
//!
//! The registry never executes rules; it only decides which rules exist for a
//! language.

use crate::error::RuleError;
use crate::rules::{Rule, load_builtin_rule_sets, load_rule_set};
use crate::types::LanguageId;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Registry mapping language identifiers to ordered rule sets
///
/// Rules are stored as trait objects to allow for different rule
/// implementations. Order inside each set is registration order and is
/// preserved across calls.
pub struct RuleRegistry {
    sets: BTreeMap<LanguageId, Vec<Box<dyn Rule>>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Create a registry preloaded with the built-in rule sets
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if an embedded rule set is invalid.
    pub fn with_builtin() -> Result<Self, RuleError> {
        let mut registry = Self::new();
        for (language, rules) in load_builtin_rule_sets()? {
            registry.register(language, rules);
        }
        Ok(registry)
    }

    /// Register an ordered rule set for a language
    ///
    /// Replaces any set previously registered for the same language.
    pub fn register(&mut self, language: LanguageId, rules: Vec<Box<dyn Rule>>) {
        debug!(language = %language, rules = rules.len(), "registering rule set");
        if self.sets.insert(language.clone(), rules).is_some() {
            debug!(language = %language, "replaced existing rule set");
        }
    }

    /// Load a rule set file and register it under `language`
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the file cannot be read or parsed.
    pub fn load_rule_set_file(
        &mut self,
        language: LanguageId,
        path: &Path,
    ) -> Result<(), RuleError> {
        let rules = load_rule_set(path)?;
        self.register(language, rules);
        Ok(())
    }

    /// Load custom rule sets from a directory
    ///
    /// Every `<language>.toml` file in the directory is registered under the
    /// language named by its file stem, overriding a built-in set of the same
    /// language. Subdirectories are not searched. A missing directory is
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if:
    /// - The path exists but is not a directory
    /// - A file name is not a valid language identifier
    /// - A rule set cannot be read or parsed
    pub fn load_custom_rule_sets(&mut self, dir: &Path) -> Result<(), RuleError> {
        if !dir.exists() {
            warn!("Rule directory does not exist: {}", dir.display());
            return Ok(());
        }

        if !dir.is_dir() {
            return Err(RuleError::InvalidDefinition(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }

        let entries = fs::read_dir(dir).map_err(|source| RuleError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        // Sort for a deterministic load order
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RuleError::Unreadable {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let language = LanguageId::new(stem).ok_or_else(|| {
                RuleError::InvalidDefinition(format!(
                    "Rule set file name is not a valid language id: {}",
                    path.display()
                ))
            })?;
            self.load_rule_set_file(language, &path)?;
        }

        Ok(())
    }

    /// Resolve a language identifier to its ordered rule set
    ///
    /// The identifier is normalized (case, aliases) before lookup.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownLanguage` if no set is registered.
    pub fn resolve(&self, language: &str) -> Result<&[Box<dyn Rule>], RuleError> {
        LanguageId::new(language)
            .and_then(|id| self.sets.get(&id))
            .map(Vec::as_slice)
            .ok_or_else(|| RuleError::UnknownLanguage(language.to_string()))
    }

    /// Registered languages, sorted
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.sets.keys()
    }

    /// Get the number of registered rule sets
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
