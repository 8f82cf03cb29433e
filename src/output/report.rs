#![forbid(unsafe_code)]

//! Lint report formatters
//!
//! The JSON formatter prints the report as one JSON array, the shape
//! downstream consumers parse. The human formatter prints one line per
//! finding followed by a summary, highlighting rule faults.

use crate::config::ColorOption;
use crate::engine::LintReport;
use crate::rules::Finding;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

/// JSON output formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JsonFormatter
    pub fn new() -> Self {
        JsonFormatter
    }

    /// Format the report as a single-line JSON array
    pub fn format(&self, report: &LintReport) -> serde_json::Result<String> {
        report.to_json()
    }

    /// Print the formatted report to stdout
    pub fn write_to_stdout(&self, report: &LintReport) -> serde_json::Result<()> {
        println!("{}", self.format(report)?);
        Ok(())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Format the report without color
    pub fn format(&self, report: &LintReport) -> String {
        let mut buffer = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail
        let _ = self.write(report, &mut buffer);
        String::from_utf8_lossy(&buffer.into_inner()).into_owned()
    }

    /// Print the report to stdout honoring the color option
    pub fn write_to_stdout(&self, report: &LintReport, color: ColorOption) -> io::Result<()> {
        let choice = match color {
            ColorOption::Auto => ColorChoice::Auto,
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write(report, &mut stdout)
    }

    /// Write the report to any color-capable writer
    pub fn write(&self, report: &LintReport, out: &mut dyn WriteColor) -> io::Result<()> {
        for finding in report.findings() {
            write_finding(finding, out)?;
        }

        if !report.is_empty() {
            writeln!(out)?;
        }

        let faults = report.faults().count();
        let issues = report.issue_count();

        if report.passed() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "✓")?;
            out.reset()?;
            writeln!(out, " No issues found")?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "✗")?;
            out.reset()?;
            writeln!(out, " {} issue(s), {} rule fault(s)", issues, faults)?;
        }

        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_finding(finding: &Finding, out: &mut dyn WriteColor) -> io::Result<()> {
    let location = match finding.line {
        Some(line) => format!("{}:{}", finding.file.display(), line),
        None => finding.file.display().to_string(),
    };

    if let Some(error) = &finding.error {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "{}: error: {}", location, error)?;
        out.reset()?;
        return writeln!(out);
    }

    if finding.passed {
        return writeln!(out, "{}: ok", location);
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(out, "{}", location)?;
    out.reset()?;
    writeln!(out, ": {}", finding.issue.as_deref().unwrap_or("issue"))
}
