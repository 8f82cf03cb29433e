#![forbid(unsafe_code)]

//! Line-oriented regex rules
//!
//! This module provides LineRule, which tests every line of a target against
//! a regular expression, and the TOML rule set format used to describe an
//! ordered list of such rules.

use crate::error::RuleError;
use crate::rules::{CheckResult, Finding, Rule, Target};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// TOML structure for a rule set document
///
/// Rules appear as an ordered `[[rule]]` array; array order is the order in
/// which the rules are registered and executed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleSetDefinition {
    #[serde(default)]
    rule: Vec<LineRuleDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LineRuleDefinition {
    name: String,
    description: String,
    issue: String,
    pattern: String,
    #[serde(default)]
    unless: Option<String>,
}

/// A rule that flags every line matching a pattern
///
/// When `unless` is set, a line that also matches it is not flagged. The two
/// patterns are independent: nothing requires them to be complementary.
pub struct LineRule {
    name: String,
    description: String,
    issue: String,
    pattern: Regex,
    unless: Option<Regex>,
}

impl std::fmt::Debug for LineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("issue", &self.issue)
            .field("pattern", &self.pattern.as_str())
            .field("unless", &self.unless.as_ref().map(Regex::as_str))
            .finish()
    }
}

impl LineRule {
    /// Builds a LineRule from its parts
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` if the name is blank and
    /// `RuleError::InvalidRegex` if either pattern fails to compile.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        issue: impl Into<String>,
        pattern: &str,
        unless: Option<&str>,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleError::InvalidDefinition(
                "Rule name must not be empty".to_string(),
            ));
        }

        let pattern = compile(&name, pattern)?;
        let unless = unless.map(|p| compile(&name, p)).transpose()?;

        Ok(LineRule {
            name,
            description: description.into(),
            issue: issue.into(),
            pattern,
            unless,
        })
    }

    /// The issue text attached to every finding of this rule
    pub fn issue_text(&self) -> &str {
        &self.issue
    }

    fn flags(&self, line: &str) -> bool {
        if !self.pattern.is_match(line) {
            return false;
        }
        match &self.unless {
            Some(unless) => !unless.is_match(line),
            None => true,
        }
    }
}

fn compile(rule_name: &str, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| {
        RuleError::InvalidRegex(format!(
            "Failed to compile pattern '{}' for rule '{}': {}",
            pattern, rule_name, e
        ))
    })
}

impl Rule for LineRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, target: &Target) -> CheckResult {
        let findings = target
            .lines()
            .filter(|(_, line)| self.flags(line))
            .map(|(number, _)| Finding::issue(target.file(), number, self.issue.as_str()))
            .collect();
        Ok(findings)
    }
}

/// Parse an ordered rule set from TOML content
///
/// # Errors
///
/// Returns `RuleError` if the TOML is invalid, a pattern fails to compile, or
/// two rules in the set share a name.
pub fn parse_rule_set(content: &str) -> Result<Vec<Box<dyn Rule>>, RuleError> {
    let def: RuleSetDefinition = toml::from_str(content)
        .map_err(|e| RuleError::InvalidDefinition(format!("Failed to parse TOML: {}", e)))?;

    let mut seen = HashSet::new();
    let mut rules: Vec<Box<dyn Rule>> = Vec::with_capacity(def.rule.len());

    for rule in def.rule {
        if !seen.insert(rule.name.clone()) {
            return Err(RuleError::InvalidDefinition(format!(
                "Duplicate rule name '{}'",
                rule.name
            )));
        }
        rules.push(Box::new(LineRule::new(
            rule.name,
            rule.description,
            rule.issue,
            &rule.pattern,
            rule.unless.as_deref(),
        )?));
    }

    Ok(rules)
}

/// Parse an ordered rule set from a TOML file path
///
/// # Errors
///
/// Returns `RuleError::Unreadable` if the file cannot be read, otherwise the
/// errors of [`parse_rule_set`].
pub fn load_rule_set(path: &Path) -> Result<Vec<Box<dyn Rule>>, RuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| RuleError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_set(&content).map_err(|e| match e {
        RuleError::InvalidDefinition(msg) => {
            RuleError::InvalidDefinition(format!("{} (in {})", msg, path.display()))
        }
        other => other,
    })
}
