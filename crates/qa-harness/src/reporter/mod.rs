//! Harness result reporting
//!
//! - **Console**: human-readable tables for local runs
//! - **JSON**: machine-readable output for CI

mod console;
mod json;

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::isolation::IsolationResult;
use crate::suite::SuiteReport;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    JsonPretty,
    #[default]
    Console,
}

#[derive(Default)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a suite report to stdout
    pub fn report(&self, report: &SuiteReport) -> Result<()> {
        emit(&self.format_suite(report)?)
    }

    /// Print isolation results to stdout
    pub fn report_isolation(&self, results: &[IsolationResult]) -> Result<()> {
        emit(&self.format_isolation(results)?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, report: &SuiteReport, path: P) -> Result<()> {
        fs::write(path, self.format_suite(report)?)?;
        Ok(())
    }

    pub fn format_suite(&self, report: &SuiteReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format_suite(report),
        }
    }

    pub fn format_isolation(&self, results: &[IsolationResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(results, false),
            OutputFormat::JsonPretty => JsonReporter::format(results, true),
            OutputFormat::Console => ConsoleReporter::format_isolation(results),
        }
    }
}

fn emit(output: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
