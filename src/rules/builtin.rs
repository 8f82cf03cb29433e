#![forbid(unsafe_code)]

//! Built-in rule sets embedded at compile time
//!
//! This module provides access to built-in rule sets that are compiled into the
//! binary using `include_str!`. This ensures the binary is self-contained and
//! can run without external rule files.

use crate::error::RuleError;
use crate::rules::{Rule, parse_rule_set};
use crate::types::LanguageId;

/// Type alias for a language paired with its ordered rules
type RuleSetList = Vec<(LanguageId, Vec<Box<dyn Rule>>)>;

/// Embedded built-in rule set files, keyed by canonical language id
const BUILTIN_RULE_SETS: &[(&str, &str)] = &[
    ("go", include_str!("../../builtin-rules/go.toml")),
    (
        "javascript",
        include_str!("../../builtin-rules/javascript.toml"),
    ),
    ("php", include_str!("../../builtin-rules/php.toml")),
];

/// Load all built-in rule sets from embedded resources
///
/// # Errors
///
/// Returns `RuleError::InvalidDefinition` if an embedded rule set fails to
/// parse.
pub fn load_builtin_rule_sets() -> Result<RuleSetList, RuleError> {
    let mut sets = Vec::with_capacity(BUILTIN_RULE_SETS.len());

    for (language, toml_content) in BUILTIN_RULE_SETS {
        let id = LanguageId::new(*language).ok_or_else(|| {
            RuleError::InvalidDefinition(format!("Invalid built-in language id '{}'", language))
        })?;

        let rules = parse_rule_set(toml_content).map_err(|e| {
            RuleError::InvalidDefinition(format!(
                "Failed to parse built-in rule set '{}': {}",
                language, e
            ))
        })?;

        sets.push((id, rules));
    }

    Ok(sets)
}
