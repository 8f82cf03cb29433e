//! Check command implementation
//!
//! This module implements the `linty check` command, which:
//! - Loads configuration from linty.toml
//! - Optionally verifies engine integrity first (secure mode)
//! - Resolves the rule set for the target's language
//! - Reads the target file
//! - Runs every rule with per-rule fault isolation
//! - Prints the report (JSON or human)
//!
//! A report is printed and the command exits 0 whenever the run completes,
//! whatever the findings say.

use crate::cli::args::CheckArgs;
use crate::cli::common::{EXIT_ERROR, EXIT_MISMATCH, EXIT_SUCCESS, build_registry, load_config};
use crate::cli::verify::{IntegrityCommandError, report_mismatches, verify_engine};
use crate::config::{ColorOption, Config, OutputFormat};
use crate::engine::{LintOrchestrator, LintReport};
use crate::error::{ConfigError, RuleError};
use crate::output::{HumanFormatter, JsonFormatter};
use crate::rules::{Rule, Target, load_rule_set};
use std::path::Path;
use tracing::info;

/// Error type specific to check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("{0}")]
    Integrity(#[from] IntegrityCommandError),

    #[error("Integrity check failed: {0} mismatch(es)")]
    Untrusted(usize),

    #[error("Failed to write report: {0}")]
    Output(String),
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Report produced (regardless of findings)
/// - 1: Secure mode found an integrity mismatch; no report
/// - 2: Error (configuration, unknown language, unreadable file)
pub fn run_check(config_path: &Path, args: &CheckArgs, color: Option<ColorOption>) -> i32 {
    match run_check_inner(config_path, args, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(CheckError::Untrusted(_)) => EXIT_MISMATCH,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Internal implementation of check command
fn run_check_inner(
    config_path: &Path,
    args: &CheckArgs,
    color: Option<ColorOption>,
) -> Result<(), CheckError> {
    let config = load_config(config_path)?;

    if args.secure || config.linty.secure {
        let mismatches = verify_engine(&config, None)?;
        if !mismatches.is_empty() {
            report_mismatches(&mismatches);
            return Err(CheckError::Untrusted(mismatches.len()));
        }
        info!("engine integrity verified");
    }

    let report = lint_file(&config, args)?;

    let format = args.format.unwrap_or(config.output.format);
    let color = color.unwrap_or(config.output.color);
    match format {
        OutputFormat::Json => JsonFormatter::new()
            .write_to_stdout(&report)
            .map_err(|e| CheckError::Output(e.to_string()))?,
        OutputFormat::Human => HumanFormatter::new()
            .write_to_stdout(&report, color)
            .map_err(|e| CheckError::Output(e.to_string()))?,
    }

    Ok(())
}

/// Resolve the rule set for the target and run it
pub(crate) fn lint_file(config: &Config, args: &CheckArgs) -> Result<LintReport, CheckError> {
    let registry;
    let explicit;

    let rules: &[Box<dyn Rule>] = match &args.rules {
        Some(path) => {
            explicit = load_rule_set(path)?;
            info!(rules = %path.display(), "using rule set file");
            &explicit
        }
        None => {
            registry = build_registry(config)?;
            let language = match &args.lang {
                Some(language) => language.clone(),
                None => config
                    .language_detector()?
                    .detect(&args.file)
                    .map(|id| id.to_string())
                    .ok_or_else(|| {
                        RuleError::UnknownLanguage(args.file.display().to_string())
                    })?,
            };
            info!(language = %language, "resolving rule set");
            registry.resolve(&language)?
        }
    };

    let target = Target::from_path(&args.file)?;
    info!(
        file = %target.file().display(),
        rules = rules.len(),
        "running rules"
    );

    Ok(LintOrchestrator::new().run(&target, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(file: PathBuf) -> CheckArgs {
        CheckArgs {
            file,
            lang: None,
            rules: None,
            format: None,
            secure: false,
        }
    }

    #[test]
    fn test_lint_file_detects_language() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("app.js");
        fs::write(&file, "console.log('x')\nvar y = 1\n").unwrap();

        let report = lint_file(&Config::default(), &args(file.clone())).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].file, file);
        assert_eq!(report.findings()[0].line, Some(1));
    }

    #[test]
    fn test_lint_file_explicit_language() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("snippet.txt");
        fs::write(&file, "<?php echo $x; ?>").unwrap();

        let mut check_args = args(file);
        check_args.lang = Some("PHP".to_string());
        let report = lint_file(&Config::default(), &check_args).unwrap();
        assert_eq!(report.findings()[0].issue.as_deref(), Some("Echo statement"));
    }

    #[test]
    fn test_lint_file_unknown_language() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("prog.cbl");
        fs::write(&file, "DISPLAY 'HI'.").unwrap();

        let mut check_args = args(file.clone());
        check_args.lang = Some("cobol".to_string());
        let err = lint_file(&Config::default(), &check_args).unwrap_err();
        assert!(matches!(err, CheckError::Rule(RuleError::UnknownLanguage(_))));

        let err = lint_file(&Config::default(), &args(file)).unwrap_err();
        assert!(matches!(err, CheckError::Rule(RuleError::UnknownLanguage(_))));
    }

    #[test]
    fn test_lint_file_unreadable_target() {
        let err = lint_file(
            &Config::default(),
            &args(PathBuf::from("/nonexistent/main.go")),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CheckError::Config(ConfigError::UnreadableTarget { .. })
        ));
    }

    #[test]
    fn test_lint_file_with_rule_set_file() {
        let temp_dir = TempDir::new().unwrap();
        let rules = temp_dir.path().join("custom.toml");
        fs::write(
            &rules,
            "[[rule]]\nname = \"Fixme\"\ndescription = \"d\"\nissue = \"Fixme marker\"\npattern = \"FIXME\"\n",
        )
        .unwrap();
        let file = temp_dir.path().join("notes.md");
        fs::write(&file, "ok\nFIXME later\n").unwrap();

        let mut check_args = args(file);
        check_args.rules = Some(rules);
        let report = lint_file(&Config::default(), &check_args).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].line, Some(2));
    }

    #[test]
    fn test_lint_file_unreadable_rule_set() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("main.go");
        fs::write(&file, "package main").unwrap();

        let mut check_args = args(file);
        check_args.rules = Some(temp_dir.path().join("missing.toml"));
        let err = lint_file(&Config::default(), &check_args).unwrap_err();
        assert!(matches!(err, CheckError::Rule(RuleError::Unreadable { .. })));
    }

    #[test]
    fn test_check_error_display() {
        let err = CheckError::Untrusted(2);
        assert_eq!(err.to_string(), "Integrity check failed: 2 mismatch(es)");
    }
}
