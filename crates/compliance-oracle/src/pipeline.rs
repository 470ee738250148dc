//! Request-scoped verification pipeline
//!
//! 1. constraint enforcement (sync)
//! 2. deterministic pre-scan of the ad copy (sync)
//! 3. compliance rewrite, quality check and quality score against the same
//!    snapshot (concurrent oracle calls)
//! 4. merge: quality fixes applied on top of the rewritten campaign, then
//!    the quality result re-derived against the returned document
//!
//! Oracle failures never escape. They become fallback results whose verdict
//! is needs-review.

use crate::client::{ContextualOracle, OracleRequest};
use crate::config::RetryPolicy;
use crate::docs::ReferenceDocs;
use crate::error::OracleFailure;
use crate::parse::{extract_json, parse_report, parse_score, QualityScore};
use crate::prompts;
use crate::retry::with_retry;
use compliance_engine::autofix::{apply_oracle_fixes, auto_fix_all, auto_fix_soft};
use compliance_engine::constraints::enforce_constraints;
use compliance_engine::reconcile::reconcile;
use compliance_engine::scanner::{self, ad_hoc_path};
use compliance_engine::terms::build_term_regex;
use compliance_engine::{
    ComplianceEngine, ComplianceResult, JurisdictionConfig, OracleReport, RewriteStatus, RuleSet,
};
use serde::Serialize;
use shared_types::{Campaign, Category, ExtractedText, FieldPath, Finding, Fix, Platform};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Everything one pipeline run produces
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub document: Campaign,
    /// Leaves cut to their platform's length limit
    pub truncated: Vec<FieldPath>,
    pub compliance: ComplianceResult,
    pub quality: ComplianceResult,
    pub score: Option<QualityScore>,
}

/// Oracle-backed verification over a jurisdiction registry
pub struct Verifier<O> {
    oracle: O,
    engine: ComplianceEngine,
    docs: ReferenceDocs,
    retry: RetryPolicy,
}

impl<O: ContextualOracle> Verifier<O> {
    pub fn new(oracle: O, engine: ComplianceEngine, docs: ReferenceDocs, retry: RetryPolicy) -> Self {
        Self {
            oracle,
            engine,
            docs,
            retry,
        }
    }

    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    async fn consult<T>(
        &self,
        label: &str,
        request: Result<OracleRequest, OracleFailure>,
        parse: fn(&str) -> Result<T, OracleFailure>,
    ) -> Result<T, OracleFailure> {
        let request = request?;
        let raw = with_retry(&self.retry, label, || self.oracle.complete(&request)).await?;
        parse(&raw)
    }

    /// Generate a campaign and keep only the requested platforms
    pub async fn generate(
        &self,
        listing: &str,
        requested: &[Platform],
    ) -> Result<Campaign, OracleFailure> {
        let request = prompts::generation(listing, requested)?;
        let raw = with_retry(&self.retry, "generate", || self.oracle.complete(&request)).await?;
        let json = extract_json(&raw)
            .ok_or_else(|| OracleFailure::NotJson("no JSON object found".to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| OracleFailure::NotJson(e.to_string()))?;
        Campaign::from_generated(value, requested).map_err(|e| OracleFailure::InvalidField {
            field: "campaign",
            reason: e.to_string(),
        })
    }

    /// Rewrite the ad copy for compliance
    ///
    /// Applies the oracle's fixes, re-scans the result with the deterministic
    /// layer and auto-fixes whatever soft findings remain. Hard findings are
    /// never substituted here. On oracle failure the input is returned
    /// unchanged with a needs-review fallback result.
    pub async fn rewrite_for_compliance(
        &self,
        document: &Campaign,
        config: &JurisdictionConfig,
        pre_scan: &[Finding],
    ) -> (Campaign, ComplianceResult) {
        let texts = document.extract_ad_copy();
        let paths: Vec<FieldPath> = texts.iter().map(|t| t.path.clone()).collect();
        let reference = self.docs.load_for(config);
        let request = prompts::compliance_rewrite(config, &texts, pre_scan, &reference);

        let report = match self.consult("compliance-rewrite", request, parse_report).await {
            Ok(report) => report,
            Err(e) => {
                warn!(state = %config.state, error = %e, "Compliance rewrite unavailable, flagging for review");
                let fallback = ComplianceResult::fallback(RuleSet::Compliance, &paths, pre_scan.to_vec());
                return (document.clone(), fallback);
            }
        };

        let (rewritten, applied) = apply_oracle_fixes(document, &report.fixes);
        info!(
            proposed = report.fixes.len(),
            applied = applied.len(),
            "Applied oracle compliance fixes"
        );

        let rescan = scanner::scan(&rewritten.extract_ad_copy(), config);
        let settled = auto_fix_soft(&rewritten, rescan);

        let mut fixes = applied;
        fixes.extend(settled.fixes);
        let remaining = settle_report(&report, fixes, document, &settled.document);

        let result = reconcile(
            RuleSet::Compliance,
            &paths,
            settled.findings,
            Some(&remaining),
            RewriteStatus::Applied,
            &config.categories(),
        );
        (settled.document, result)
    }

    /// Pattern scan plus an oracle check of one ad-hoc string
    ///
    /// `None` if the jurisdiction is unknown.
    pub async fn check_text(&self, text: &str, code: &str) -> Option<ComplianceResult> {
        let config = self.engine.jurisdiction(code)?;
        let pattern = self.engine.scan_one(text, code)?;
        let paths = [ad_hoc_path()];
        let extracted = ExtractedText {
            path: ad_hoc_path(),
            text: text.to_string(),
        };
        let reference = self.docs.load_for(config);
        let request = prompts::compliance_single(config, &extracted, &reference);

        let result = match self.consult("compliance-check", request, parse_report).await {
            Ok(report) => reconcile(
                RuleSet::Compliance,
                &paths,
                pattern,
                Some(&report),
                RewriteStatus::NotAttempted,
                &config.categories(),
            ),
            Err(e) => {
                warn!(state = %config.state, error = %e, "Compliance check unavailable, flagging for review");
                ComplianceResult::fallback(RuleSet::Compliance, &paths, pattern)
            }
        };
        Some(result)
    }

    /// Quality findings for the ad copy, deterministic and contextual
    pub async fn quality_check(&self, document: &Campaign) -> ComplianceResult {
        let texts = document.extract_ad_copy();
        let paths: Vec<FieldPath> = texts.iter().map(|t| t.path.clone()).collect();
        let pattern = self.engine.registry().quality().scan(&texts);

        match self.quality_report(&texts).await {
            Some(report) => reconcile(
                RuleSet::Quality,
                &paths,
                pattern,
                Some(&report),
                RewriteStatus::NotAttempted,
                &quality_categories(),
            ),
            None => ComplianceResult::fallback(RuleSet::Quality, &paths, pattern),
        }
    }

    async fn quality_report(&self, texts: &[ExtractedText]) -> Option<OracleReport> {
        let request = prompts::quality_check(self.engine.registry().quality(), texts);
        match self.consult("quality-check", request, parse_report).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "Quality check unavailable, flagging for review");
                None
            }
        }
    }

    /// Apply quality corrections on top of the compliance rewrite
    ///
    /// The oracle's quality fixes go first, then the quality rules are
    /// re-scanned on the result and every mechanical correction is applied.
    /// A corrected required rule is resolved; a corrected recommendation
    /// stays in the result marked `auto_fixed`. Without an oracle report the
    /// deterministic corrections still apply but the verdict is needs-review.
    pub fn merge_quality(
        &self,
        snapshot: &Campaign,
        rewritten: &Campaign,
        report: Option<&OracleReport>,
    ) -> (Campaign, ComplianceResult) {
        let (with_oracle, applied) = match report {
            Some(report) => apply_oracle_fixes(rewritten, &report.fixes),
            None => (rewritten.clone(), Vec::new()),
        };

        let texts = with_oracle.extract_ad_copy();
        let paths: Vec<FieldPath> = texts.iter().map(|t| t.path.clone()).collect();
        let rescan = self.engine.registry().quality().scan(&texts);
        let mut settled = auto_fix_all(&with_oracle, rescan);
        settled.findings.retain(|f| !(f.is_hard() && f.auto_fixed));

        let result = match report {
            Some(report) => {
                let mut fixes = applied;
                fixes.extend(settled.fixes);
                let remaining = settle_report(report, fixes, snapshot, &settled.document);
                reconcile(
                    RuleSet::Quality,
                    &paths,
                    settled.findings,
                    Some(&remaining),
                    RewriteStatus::Applied,
                    &quality_categories(),
                )
            }
            None => ComplianceResult::fallback(RuleSet::Quality, &paths, settled.findings),
        };
        (settled.document, result)
    }

    /// Oracle quality score; `None` when unavailable
    pub async fn quality_score(&self, document: &Campaign) -> Option<QualityScore> {
        let request = prompts::quality_score(&document.extract_ad_copy());
        match self.consult("quality-score", request, parse_score).await {
            Ok(score) => Some(score),
            Err(e) => {
                warn!(error = %e, "Quality score unavailable");
                None
            }
        }
    }

    /// Full verification run for one campaign
    pub async fn run(&self, document: &Campaign, config: &JurisdictionConfig) -> PipelineOutput {
        let (constrained, truncated) = enforce_constraints(document, config);
        let pre_scan = scanner::scan(&constrained.extract_ad_copy(), config);
        info!(
            state = %config.state,
            truncated = truncated.len(),
            pre_scan = pre_scan.len(),
            "Starting verification"
        );

        let ad_copy = constrained.extract_ad_copy();
        let ((rewritten, compliance), quality_report, score) = tokio::join!(
            self.rewrite_for_compliance(&constrained, config, &pre_scan),
            self.quality_report(&ad_copy),
            self.quality_score(&constrained),
        );

        let (document, quality) =
            self.merge_quality(&constrained, &rewritten, quality_report.as_ref());

        info!(
            compliance = %compliance.verdict,
            quality = %quality.verdict,
            score = ?score.as_ref().map(|s| s.overall),
            "Verification finished"
        );

        PipelineOutput {
            document,
            truncated,
            compliance,
            quality,
            score,
        }
    }
}

fn quality_categories() -> BTreeSet<Category> {
    Category::QUALITY.into_iter().collect()
}

/// Keep the oracle findings that the applied fixes did not resolve
///
/// A finding is resolved when an applied fix on its path targets the same
/// term, or when the term matched `before` and no longer matches `after`.
/// A path verdict survives unless its leaf changed and none of the oracle's
/// findings on it remain open.
fn settle_report(
    report: &OracleReport,
    fixes: Vec<Fix>,
    before: &Campaign,
    after: &Campaign,
) -> OracleReport {
    let findings: Vec<Finding> = report
        .findings
        .iter()
        .filter(|f| !is_resolved(f, &fixes, before, after))
        .cloned()
        .collect();

    let open: BTreeSet<&FieldPath> = findings.iter().map(|f| &f.path).collect();
    let path_verdicts = report
        .path_verdicts
        .iter()
        .filter(|(path, _)| before.text_at(path) == after.text_at(path) || open.contains(path))
        .map(|(path, passed)| (path.clone(), *passed))
        .collect();

    let resolved = report.findings.len() - findings.len();
    if resolved > 0 {
        info!(resolved, open = findings.len(), "Settled oracle findings against applied fixes");
    }

    OracleReport {
        findings,
        fixes,
        path_verdicts,
        verdict: report.verdict,
    }
}

fn is_resolved(finding: &Finding, fixes: &[Fix], before: &Campaign, after: &Campaign) -> bool {
    let term = finding.term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }

    let covered = fixes.iter().any(|fix| {
        fix.path == finding.path
            && (fix.term.as_deref().is_some_and(|t| t.trim().to_lowercase() == term)
                || fix.before.to_lowercase().contains(&term))
    });
    if covered {
        return true;
    }

    let (Some(before), Some(after)) = (before.text_at(&finding.path), after.text_at(&finding.path))
    else {
        return false;
    };
    match build_term_regex(&finding.term) {
        Ok(regex) => regex.is_match(before) && !regex.is_match(after),
        Err(_) => false,
    }
}
