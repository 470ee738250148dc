//! Console reporter
//!
//! ASCII tables and pass/fail markers for reading a run in a terminal.

use anyhow::Result;
use std::fmt::Write;

use crate::compare::MismatchKind;
use crate::isolation::IsolationResult;
use crate::suite::{SuiteReport, TestResult};

const RULE: &str = "────────────────────────────────────────────────────────────────";

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format_suite(report: &SuiteReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                       QA SUITE RESULTS                        ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Suite:    {}", report.suite_name)?;
        writeln!(output, "Started:  {}", report.started_at)?;
        writeln!(output)?;

        for result in &report.results {
            Self::format_case(&mut output, result)?;
        }

        writeln!(output, "{}", RULE)?;
        writeln!(output, "Category coverage:")?;
        writeln!(output, "  ┌────────────────────────────┬───────┬─────────┐")?;
        writeln!(output, "  │ Category                   │ Cases │ Covered │")?;
        writeln!(output, "  ├────────────────────────────┼───────┼─────────┤")?;
        for row in &report.coverage {
            writeln!(
                output,
                "  │ {:<26} │ {:>5} │ {:^7} │",
                row.category.to_string(),
                row.cases,
                if row.covered { "✓" } else { "✗" }
            )?;
        }
        writeln!(output, "  └────────────────────────────┴───────┴─────────┘")?;
        writeln!(output)?;

        let summary = &report.summary;
        writeln!(output, "{}", RULE)?;
        writeln!(
            output,
            "Cases: {} total, {} passed, {} failed ({:.1}%)",
            summary.total,
            summary.passed,
            summary.failed,
            summary.pass_rate * 100.0
        )?;
        writeln!(
            output,
            "Mismatches: {} missed, {} false positives",
            summary.missed, summary.false_positives
        )?;
        let status = if report.passed() { "✓ PASSED" } else { "✗ FAILED" };
        writeln!(output, "Overall Status: {}", status)?;
        writeln!(output)?;
        Ok(output)
    }

    fn format_case(output: &mut String, result: &TestResult) -> Result<()> {
        let marker = if result.passed { "✓" } else { "✗" };
        writeln!(output, "  {} {} [{}]", marker, result.id, result.state)?;

        if let Some(error) = &result.error {
            writeln!(output, "      error: {}", error)?;
        }
        for mismatch in &result.mismatches {
            let kind = match mismatch.kind {
                MismatchKind::Missed => "missed",
                MismatchKind::FalsePositive => "false positive",
            };
            writeln!(
                output,
                "      {}: \"{}\" ({})",
                kind, mismatch.term, mismatch.category
            )?;
        }
        Ok(())
    }

    pub fn format_isolation(results: &[IsolationResult]) -> Result<String> {
        let mut output = String::new();
        let failed: Vec<&IsolationResult> = results.iter().filter(|r| !r.passed).collect();

        writeln!(output)?;
        writeln!(output, "Cross-jurisdiction isolation: {} checks", results.len())?;
        writeln!(output, "{}", RULE)?;

        for result in &failed {
            writeln!(output, "  ✗ {} text scanned as {}", result.source, result.tested)?;
            for leak in &result.leaks {
                writeln!(
                    output,
                    "      {}: \"{}\" cites {}",
                    leak.path, leak.term, leak.legal_citation
                )?;
            }
        }

        let status = if failed.is_empty() {
            "✓ PASSED".to_string()
        } else {
            format!("✗ FAILED ({} leaking checks)", failed.len())
        };
        writeln!(output, "Overall Status: {}", status)?;
        Ok(output)
    }
}
