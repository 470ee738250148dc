//! Suite runner over the deterministic layer
//!
//! Cases are scanned with the pattern engine only. The harness checks the
//! rule tables themselves, so no contextual oracle is involved and a run is
//! a pure function of the registry and the corpus.

use crate::compare::{compare_findings, ExpectedFinding, Mismatch, MismatchKind};
use crate::corpus::TestCase;
use compliance_engine::ComplianceEngine;
use serde::{Deserialize, Serialize};
use shared_types::{Category, Finding};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Outcome of one labeled case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub state: String,
    pub passed: bool,
    pub expected: Vec<ExpectedFinding>,
    pub actual: Vec<Finding>,
    pub mismatches: Vec<Mismatch>,
    /// Set when the case could not be scanned at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How well the corpus exercises one compliance category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    pub category: Category,
    /// Cases with at least one expected finding in this category
    pub cases: usize,
    pub covered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub missed: usize,
    pub false_positives: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub started_at: String,
    pub results: Vec<TestResult>,
    pub summary: SuiteSummary,
    pub coverage: Vec<CategoryCoverage>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Compliance categories no case exercises
    pub fn uncovered(&self) -> impl Iterator<Item = Category> + '_ {
        self.coverage
            .iter()
            .filter(|c| !c.covered)
            .map(|c| c.category)
    }
}

/// Scan and diff one case
pub fn run_case(engine: &ComplianceEngine, case: &TestCase) -> TestResult {
    let Some(actual) = engine.scan_one(&case.text, &case.state) else {
        warn!(case = %case.id, state = %case.state, "Unsupported jurisdiction in test case");
        return TestResult {
            id: case.id.clone(),
            state: case.state.clone(),
            passed: false,
            expected: case.expected.clone(),
            actual: Vec::new(),
            mismatches: Vec::new(),
            error: Some(format!("unsupported jurisdiction: {}", case.state)),
        };
    };

    let comparison = compare_findings(&case.expected, &actual);
    debug!(
        case = %case.id,
        findings = actual.len(),
        mismatches = comparison.mismatches.len(),
        "Case scanned"
    );

    TestResult {
        id: case.id.clone(),
        state: case.state.clone(),
        passed: comparison.passed,
        expected: case.expected.clone(),
        actual,
        mismatches: comparison.mismatches,
        error: None,
    }
}

/// Per compliance category, the number of cases whose labels exercise it
pub fn category_coverage(cases: &[TestCase]) -> Vec<CategoryCoverage> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for case in cases {
        let categories: BTreeSet<Category> = case.expected.iter().map(|e| e.category).collect();
        for category in categories {
            *counts.entry(category).or_default() += 1;
        }
    }

    Category::COMPLIANCE
        .iter()
        .map(|category| {
            let cases = counts.get(category).copied().unwrap_or(0);
            CategoryCoverage {
                category: *category,
                cases,
                covered: cases > 0,
            }
        })
        .collect()
}

fn summarize(results: &[TestResult]) -> SuiteSummary {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let count = |kind: MismatchKind| {
        results
            .iter()
            .flat_map(|r| r.mismatches.iter())
            .filter(|m| m.kind == kind)
            .count()
    };

    SuiteSummary {
        total,
        passed,
        failed: total - passed,
        missed: count(MismatchKind::Missed),
        false_positives: count(MismatchKind::FalsePositive),
        pass_rate: if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64
        },
    }
}

/// Run every case and aggregate results and coverage
pub fn run_test_suite(engine: &ComplianceEngine, name: &str, cases: &[TestCase]) -> SuiteReport {
    let started_at = chrono::Utc::now().to_rfc3339();
    let results: Vec<TestResult> = cases.iter().map(|case| run_case(engine, case)).collect();
    let summary = summarize(&results);
    let coverage = category_coverage(cases);

    info!(
        suite = name,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "Test suite finished"
    );

    SuiteReport {
        suite_name: name.to_string(),
        started_at,
        results,
        summary,
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn case(id: &str, state: &str, text: &str, expected: &[(&str, Category)]) -> TestCase {
        TestCase {
            id: id.to_string(),
            state: state.to_string(),
            text: text.to_string(),
            expected: expected
                .iter()
                .map(|(term, category)| ExpectedFinding::new(*term, *category))
                .collect(),
        }
    }

    #[test]
    fn test_passing_and_failing_cases() {
        let engine = ComplianceEngine::new();
        let cases = vec![
            case("hit", "OH", "No military renters.", &[("no military", Category::MilitaryStatus)]),
            case("clean", "MT", "Sunny kitchen with a family room.", &[]),
            case("miss", "MT", "Sunny kitchen.", &[("no children", Category::FamilialStatus)]),
        ];

        let report = run_test_suite(&engine, "unit", &cases);

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.missed, 1);
        assert_eq!(report.summary.false_positives, 0);
        assert!(!report.passed());
        assert_eq!(report.failures().next().map(|r| r.id.as_str()), Some("miss"));
    }

    #[test]
    fn test_unsupported_state_fails_the_case() {
        let engine = ComplianceEngine::new();
        let result = run_case(&engine, &case("tx", "TX", "Anything", &[]));
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("unsupported jurisdiction: TX"));
    }

    #[test]
    fn test_coverage_counts_cases_not_findings() {
        let cases = vec![
            case(
                "a",
                "MT",
                "x",
                &[
                    ("no children", Category::FamilialStatus),
                    ("adults only", Category::FamilialStatus),
                ],
            ),
            case("b", "MT", "y", &[("no kids", Category::FamilialStatus)]),
        ];
        let coverage = category_coverage(&cases);

        assert_eq!(coverage.len(), Category::COMPLIANCE.len());
        let familial = coverage
            .iter()
            .find(|c| c.category == Category::FamilialStatus)
            .unwrap();
        assert_eq!(familial.cases, 2);
        assert!(familial.covered);
        assert!(coverage
            .iter()
            .filter(|c| c.category != Category::FamilialStatus)
            .all(|c| !c.covered && c.cases == 0));
    }

    #[test]
    fn test_empty_suite() {
        let report = run_test_suite(&ComplianceEngine::new(), "empty", &[]);
        assert_eq!(report.summary.pass_rate, 0.0);
        assert!(report.passed());
        assert_eq!(report.uncovered().count(), Category::COMPLIANCE.len());
    }
}
