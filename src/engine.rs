//! Rule execution engine and finding aggregation

pub mod orchestrator;

pub use orchestrator::{LintOrchestrator, LintReport, RuleFault, RuleOutcome, run_rule};
