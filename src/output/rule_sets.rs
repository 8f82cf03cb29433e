#![forbid(unsafe_code)]

//! Rule set listing formatters for the `list` command

use crate::rules::Rule;
use crate::types::LanguageId;
use serde::Serialize;

/// One rule set as shown by `linty list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSetListing {
    /// Language the set is registered under
    pub language: LanguageId,
    /// Rules in registration order
    pub rules: Vec<RuleListing>,
}

/// One rule inside a listed rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    /// Rule name
    pub name: String,
    /// Rule description
    pub description: String,
}

impl RuleSetListing {
    /// Captures the metadata of a resolved rule set
    pub fn new(language: LanguageId, rules: &[Box<dyn Rule>]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| RuleListing {
                name: rule.name().to_string(),
                description: rule.description().to_string(),
            })
            .collect();
        Self { language, rules }
    }
}

/// Human-readable rule set formatter
pub struct RuleSetHumanFormatter;

impl RuleSetHumanFormatter {
    /// Creates a new formatter
    pub fn new() -> Self {
        RuleSetHumanFormatter
    }

    /// Format listings as indented text
    pub fn format(&self, listings: &[RuleSetListing]) -> String {
        let mut output = String::new();

        for listing in listings {
            output.push_str(&format!(
                "{} ({} rules):\n",
                listing.language,
                listing.rules.len()
            ));
            for (index, rule) in listing.rules.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} - {}\n",
                    index + 1,
                    rule.name,
                    rule.description
                ));
            }
        }

        output
    }

    /// Print listings to stdout
    pub fn write_to_stdout(&self, listings: &[RuleSetListing]) {
        print!("{}", self.format(listings));
    }
}

impl Default for RuleSetHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON rule set formatter
pub struct RuleSetJsonFormatter;

impl RuleSetJsonFormatter {
    /// Creates a new formatter
    pub fn new() -> Self {
        RuleSetJsonFormatter
    }

    /// Format listings as a JSON array
    pub fn format(&self, listings: &[RuleSetListing]) -> serde_json::Result<String> {
        serde_json::to_string(listings)
    }

    /// Print listings to stdout
    pub fn write_to_stdout(&self, listings: &[RuleSetListing]) -> serde_json::Result<()> {
        println!("{}", self.format(listings)?);
        Ok(())
    }
}

impl Default for RuleSetJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleRegistry;

    fn go_listing() -> RuleSetListing {
        let registry = RuleRegistry::with_builtin().unwrap();
        RuleSetListing::new(
            LanguageId::new("go").unwrap(),
            registry.resolve("go").unwrap(),
        )
    }

    #[test]
    fn test_listing_preserves_order() {
        let listing = go_listing();
        let names: Vec<&str> = listing.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Unused Import", "Unused Variable", "Missing Error Handling"]
        );
    }

    #[test]
    fn test_human_format() {
        let output = RuleSetHumanFormatter::new().format(&[go_listing()]);
        assert!(output.starts_with("go (3 rules):\n"));
        assert!(output.contains("  1. Unused Import - Checks for unused imports in Go files.\n"));
    }

    #[test]
    fn test_json_format() {
        let json = RuleSetJsonFormatter::new().format(&[go_listing()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["language"], "go");
        assert_eq!(parsed[0]["rules"][2]["name"], "Missing Error Handling");
    }
}
