//! List command implementation
//!
//! This module implements the `linty list` command, which prints every
//! registered rule set (built-in and custom) with its rules in execution
//! order, or a single set when a language is given.

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, build_registry, load_config};
use crate::config::OutputFormat;
use crate::error::{ConfigError, RuleError};
use crate::output::{RuleSetHumanFormatter, RuleSetJsonFormatter, RuleSetListing};
use crate::rules::RuleRegistry;
use crate::types::LanguageId;
use std::path::Path;

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Failed to write listing: {0}")]
    Output(#[from] serde_json::Error),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error (configuration, unknown language, invalid rule set)
pub fn run_list(config_path: &Path, language: Option<&str>, format: OutputFormat) -> i32 {
    match run_list_inner(config_path, language, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_list_inner(
    config_path: &Path,
    language: Option<&str>,
    format: OutputFormat,
) -> Result<(), ListError> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;
    let listings = collect_listings(&registry, language)?;

    match format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No rule sets are registered.");
            } else {
                RuleSetHumanFormatter::new().write_to_stdout(&listings);
            }
        }
        OutputFormat::Json => RuleSetJsonFormatter::new().write_to_stdout(&listings)?,
    }

    Ok(())
}

/// Snapshot the registry for display, optionally narrowed to one language
fn collect_listings(
    registry: &RuleRegistry,
    language: Option<&str>,
) -> Result<Vec<RuleSetListing>, RuleError> {
    match language {
        Some(language) => {
            let rules = registry.resolve(language)?;
            let id = LanguageId::new(language)
                .ok_or_else(|| RuleError::UnknownLanguage(language.to_string()))?;
            Ok(vec![RuleSetListing::new(id, rules)])
        }
        None => registry
            .languages()
            .map(|id| Ok(RuleSetListing::new(id.clone(), registry.resolve(id.as_str())?)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_all_listings_sorted() {
        let registry = RuleRegistry::with_builtin().unwrap();
        let listings = collect_listings(&registry, None).unwrap();
        let languages: Vec<&str> = listings.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(languages, vec!["go", "javascript", "php"]);
        assert_eq!(listings[0].rules.len(), 3);
    }

    #[test]
    fn test_collect_single_listing_by_alias() {
        let registry = RuleRegistry::with_builtin().unwrap();
        let listings = collect_listings(&registry, Some("JS")).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].language.as_str(), "javascript");
        assert_eq!(listings[0].rules[0].name, "Console Log");
    }

    #[test]
    fn test_collect_unknown_language() {
        let registry = RuleRegistry::with_builtin().unwrap();
        let err = collect_listings(&registry, Some("cobol")).unwrap_err();
        assert!(matches!(err, RuleError::UnknownLanguage(ref l) if l == "cobol"));
    }

    #[test]
    fn test_collect_empty_registry() {
        let registry = RuleRegistry::new();
        assert!(collect_listings(&registry, None).unwrap().is_empty());
    }
}
