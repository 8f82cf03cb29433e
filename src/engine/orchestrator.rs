#![forbid(unsafe_code)]

//! Fault-isolating rule orchestration
//!
//! This module provides the LintOrchestrator, which applies an ordered rule
//! set to a single target and aggregates every rule's findings into one
//! LintReport. Rules run strictly one after another; a rule that fails (by
//! returning an error or by panicking) contributes exactly one fault finding
//! and the run continues with the next rule.

use crate::rules::{Finding, Rule, Target};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, warn};

thread_local! {
    /// Number of rule checks currently running on this thread
    static RULES_RUNNING: Cell<u32> = const { Cell::new(0) };
}

static PANIC_HOOK: Once = Once::new();

/// Why a single rule invocation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFault {
    /// Name of the failing rule
    pub rule: String,
    /// Error or panic message
    pub message: String,
}

/// Outcome of running one rule against one target
pub type RuleOutcome = Result<Vec<Finding>, RuleFault>;

/// Ordered aggregate of findings from one run
///
/// Primary order is rule registration order; within a rule, findings keep the
/// order the rule produced them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintReport {
    findings: Vec<Finding>,
}

impl LintReport {
    /// All findings in report order
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consumes the report, returning its findings
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Findings that record rule-execution faults
    pub fn faults(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_fault())
    }

    /// Number of detected issues, excluding faults
    pub fn issue_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| !f.passed && !f.is_fault())
            .count()
    }

    /// True when no finding reports a failure
    pub fn passed(&self) -> bool {
        self.findings.iter().all(|f| f.passed)
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// True when the report has no findings
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Serializes the report as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.findings)
    }
}

impl From<Vec<Finding>> for LintReport {
    fn from(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}

/// Runs rule sets against targets with per-rule fault isolation
///
/// The orchestrator is stateless; it performs no deduplication, scoring, or
/// filtering of findings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LintOrchestrator;

impl LintOrchestrator {
    /// Creates a new LintOrchestrator
    pub fn new() -> Self {
        LintOrchestrator
    }

    /// Apply every rule, in order, to the target
    ///
    /// Never fails: a failing rule is recorded as a single fault finding.
    pub fn run(&self, target: &Target, rules: &[Box<dyn Rule>]) -> LintReport {
        let mut findings = Vec::new();

        for rule in rules {
            match run_rule(rule.as_ref(), target) {
                Ok(produced) => {
                    debug!(rule = rule.name(), findings = produced.len(), "rule completed");
                    findings.extend(produced);
                }
                Err(fault) => {
                    warn!(
                        rule = %fault.rule,
                        file = %target.file().display(),
                        "rule failed: {}",
                        fault.message
                    );
                    findings.push(Finding::fault(target.file(), &fault.rule, &fault.message));
                }
            }
        }

        LintReport { findings }
    }
}

/// Invoke one rule, converting errors and panics into a RuleFault
///
/// A panic raised by the rule is logged through `tracing` at debug level
/// instead of the default hook's stderr message. Panics raised outside a
/// rule check still reach the previously installed hook.
pub fn run_rule(rule: &dyn Rule, target: &Target) -> RuleOutcome {
    install_panic_hook();
    let outcome = {
        let _running = RuleScope::enter();
        panic::catch_unwind(AssertUnwindSafe(|| rule.check(target)))
    };

    let fault = |message: String| RuleFault {
        rule: rule.name().to_string(),
        message,
    };

    match outcome {
        Ok(Ok(mut findings)) => {
            // A rule cannot attribute findings to another file
            for finding in &mut findings {
                if finding.file != target.file() {
                    debug!(
                        rule = rule.name(),
                        reported = %finding.file.display(),
                        "rewriting finding file to target file"
                    );
                    finding.file = target.file().to_path_buf();
                }
            }
            Ok(findings)
        }
        Ok(Err(error)) => Err(fault(error.to_string())),
        Err(payload) => Err(fault(panic_message(payload.as_ref()))),
    }
}

/// Marks the current thread as running a rule check until dropped
struct RuleScope;

impl RuleScope {
    fn enter() -> Self {
        RULES_RUNNING.with(|running| running.set(running.get() + 1));
        RuleScope
    }
}

impl Drop for RuleScope {
    fn drop(&mut self) {
        RULES_RUNNING.with(|running| running.set(running.get().saturating_sub(1)));
    }
}

fn in_rule_check() -> bool {
    RULES_RUNNING.with(|running| running.get() > 0)
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if in_rule_check() {
                let location = info.location().map(ToString::to_string).unwrap_or_default();
                debug!(location = %location, "rule panicked");
            } else {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}
