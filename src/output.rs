//! Output formatters (human and JSON)

pub mod report;
pub mod rule_sets;

pub use report::{HumanFormatter, JsonFormatter};
pub use rule_sets::{RuleListing, RuleSetHumanFormatter, RuleSetJsonFormatter, RuleSetListing};
