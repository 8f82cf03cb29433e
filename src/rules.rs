#![forbid(unsafe_code)]

//! Rule definitions, rule sets and the rule registry

mod builtin;
mod language;
mod line_rule;
mod registry;
mod rule;

// Re-export core types
pub use builtin::load_builtin_rule_sets;
pub use language::LanguageDetector;
pub use line_rule::{LineRule, load_rule_set, parse_rule_set};
pub use registry::RuleRegistry;
pub use rule::{CheckError, CheckResult, Finding, Rule, Target};
