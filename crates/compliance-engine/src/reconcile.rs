//! Reconciliation of pattern and oracle findings
//!
//! Both layers report findings against the same extracted paths. Per path
//! the oracle's finding wins when both flag the same category; the pattern
//! finding is then dropped rather than double-counted. The campaign verdict
//! follows a fixed precedence (see [`derive_verdict`]).

use serde::{Deserialize, Serialize};
use shared_types::{Category, FieldPath, Finding, Fix, Severity, Verdict};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::warn;

/// Which registry produced the findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Severities are hard / soft
    Compliance,
    /// Severities stand for required / recommended
    Quality,
}

/// Outcome of the oracle rewrite step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteStatus {
    /// Pattern-only scan, no rewrite requested
    NotAttempted,
    /// Oracle answered and its fixes were applied
    Applied,
    /// Oracle call or parse failed
    Failed,
}

/// Validated oracle output, ready for reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleReport {
    pub findings: Vec<Finding>,
    pub fixes: Vec<Fix>,
    /// Explicit per-path pass/fail verdicts
    pub path_verdicts: BTreeMap<FieldPath, bool>,
    pub verdict: Option<Verdict>,
}

/// Reconciled findings for one addressed leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResult {
    pub path: FieldPath,
    pub passed: bool,
    pub violations: Vec<Finding>,
    pub hard_count: usize,
    pub soft_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total: usize,
    pub hard: usize,
    pub soft: usize,
    pub auto_fixed: usize,
    pub contextual: usize,
}

/// Campaign-level compliance (or quality) result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub rule_set: RuleSet,
    pub platforms: Vec<PlatformResult>,
    pub fixes: Vec<Fix>,
    pub verdict: Verdict,
    pub rewrite_applied: bool,
    pub summary: ResultSummary,
}

impl ComplianceResult {
    /// Result used when the oracle could not be consulted
    ///
    /// Deterministic findings are still reported, but the verdict is always
    /// needs-review.
    pub fn fallback(rule_set: RuleSet, paths: &[FieldPath], pattern: Vec<Finding>) -> Self {
        reconcile(
            rule_set,
            paths,
            pattern,
            None,
            RewriteStatus::Failed,
            &BTreeSet::new(),
        )
    }

    /// All violations across platforms, in path order
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.platforms.iter().flat_map(|p| p.violations.iter())
    }

    pub fn platform(&self, path: &FieldPath) -> Option<&PlatformResult> {
        self.platforms.iter().find(|p| &p.path == path)
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Compliant
    }
}

/// Campaign verdict, in precedence order
///
/// 1. the oracle rewrite failed: needs-review
/// 2. nothing remains: compliant
/// 3. everything remaining is soft and was auto-fixed: needs-review
/// 4. otherwise: non-compliant
pub fn derive_verdict(status: RewriteStatus, findings: &[Finding]) -> Verdict {
    if status == RewriteStatus::Failed {
        return Verdict::NeedsReview;
    }
    if findings.is_empty() {
        return Verdict::Compliant;
    }
    if findings
        .iter()
        .all(|f| f.severity == Severity::Soft && f.auto_fixed)
    {
        return Verdict::NeedsReview;
    }
    Verdict::NonCompliant
}

/// Merge both layers into one result per path
///
/// `paths` is the extraction order and defines the output order. Oracle
/// findings on unknown paths, or in a category outside `categories`, are
/// logged and dropped. An empty `categories` set accepts every category.
pub fn reconcile(
    rule_set: RuleSet,
    paths: &[FieldPath],
    pattern: Vec<Finding>,
    oracle: Option<&OracleReport>,
    status: RewriteStatus,
    categories: &BTreeSet<Category>,
) -> ComplianceResult {
    let known: HashSet<&FieldPath> = paths.iter().collect();

    let mut by_path: BTreeMap<FieldPath, (Vec<Finding>, Vec<Finding>)> = BTreeMap::new();

    for finding in pattern {
        if !known.contains(&finding.path) {
            warn!(path = %finding.path, term = %finding.term, "Dropping pattern finding on unknown path");
            continue;
        }
        by_path.entry(finding.path.clone()).or_default().0.push(finding);
    }

    if let Some(report) = oracle {
        for finding in &report.findings {
            if !known.contains(&finding.path) {
                warn!(path = %finding.path, term = %finding.term, "Dropping oracle finding on unknown path");
                continue;
            }
            if !categories.is_empty() && !categories.contains(&finding.category) {
                warn!(
                    path = %finding.path,
                    category = %finding.category,
                    "Dropping oracle finding in a category this rule set does not define"
                );
                continue;
            }
            by_path
                .entry(finding.path.clone())
                .or_default()
                .1
                .push(finding.clone());
        }
    }

    let platforms: Vec<PlatformResult> = paths
        .iter()
        .map(|path| {
            let (pattern, oracle_findings) = by_path.remove(path).unwrap_or_default();
            let oracle_categories: HashSet<Category> =
                oracle_findings.iter().map(|f| f.category).collect();

            let mut violations = oracle_findings;
            violations.extend(
                pattern
                    .into_iter()
                    .filter(|f| !oracle_categories.contains(&f.category)),
            );

            let passed = oracle
                .and_then(|r| r.path_verdicts.get(path).copied())
                .unwrap_or(violations.is_empty());

            PlatformResult {
                path: path.clone(),
                passed,
                hard_count: violations.iter().filter(|f| f.is_hard()).count(),
                soft_count: violations.iter().filter(|f| !f.is_hard()).count(),
                violations,
            }
        })
        .collect();

    let fixes = oracle
        .map(|r| {
            r.fixes
                .iter()
                .filter(|fix| {
                    let ok = known.contains(&fix.path);
                    if !ok {
                        warn!(path = %fix.path, "Dropping oracle fix on unknown path");
                    }
                    ok
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let remaining: Vec<Finding> = platforms
        .iter()
        .flat_map(|p| p.violations.iter().cloned())
        .collect();

    ComplianceResult {
        rule_set,
        verdict: derive_verdict(status, &remaining),
        rewrite_applied: status == RewriteStatus::Applied,
        summary: summarize(&remaining),
        platforms,
        fixes,
    }
}

fn summarize(findings: &[Finding]) -> ResultSummary {
    ResultSummary {
        total: findings.len(),
        hard: findings.iter().filter(|f| f.is_hard()).count(),
        soft: findings.iter().filter(|f| !f.is_hard()).count(),
        auto_fixed: findings.iter().filter(|f| f.auto_fixed).count(),
        contextual: findings.iter().filter(|f| f.is_contextual).count(),
    }
}
