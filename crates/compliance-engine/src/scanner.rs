// Deterministic term scanning over extracted campaign text
use crate::jurisdiction::{JurisdictionConfig, Registry};
use crate::patterns::is_allowlisted;
use crate::reconcile::{reconcile, ComplianceResult, RewriteStatus, RuleSet};
use crate::terms::{Term, TermPattern};
use shared_types::{Campaign, ExtractedText, FieldPath, Finding, FindingSource, MatchedSpan};
use tracing::debug;

/// Scan every text against every term
///
/// Only the first match of a term in a field is considered. If that match
/// sits in an allowlisted collocation the term is not reported for the field.
pub fn scan_terms(texts: &[ExtractedText], terms: &[Term]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for extracted in texts {
        let text = extracted.text.as_str();
        if text.trim().is_empty() {
            continue;
        }

        for term in terms {
            let Some(m) = term.regex().find(text) else {
                continue;
            };

            if term.pattern == TermPattern::Phrase
                && is_allowlisted(text, m.start(), m.end(), &term.words())
            {
                debug!(path = %extracted.path, term = %term.term, "Match allowlisted by context");
                continue;
            }

            findings.push(Finding {
                path: extracted.path.clone(),
                term: term.term.clone(),
                category: term.category,
                severity: term.severity,
                explanation: term.explanation.clone(),
                legal_citation: term.legal_citation.clone(),
                suggested_alternative: term.suggested_alternative.clone(),
                matched_span: Some(MatchedSpan {
                    start: m.start(),
                    text: m.as_str().to_string(),
                }),
                is_contextual: false,
                source: FindingSource::Pattern,
                auto_fixed: false,
            });
        }
    }

    findings
}

/// Compliance scan against one jurisdiction
pub fn scan(texts: &[ExtractedText], config: &JurisdictionConfig) -> Vec<Finding> {
    scan_terms(texts, &config.terms)
}

/// Scan one ad-hoc string; `None` when the jurisdiction is unknown
pub fn scan_one(registry: &Registry, text: &str, code: &str) -> Option<Vec<Finding>> {
    let config = registry.get(code)?;
    let texts = [ExtractedText {
        path: ad_hoc_path(),
        text: text.to_string(),
    }];
    Some(scan(&texts, config))
}

/// Path reported for findings on ad-hoc text
pub fn ad_hoc_path() -> FieldPath {
    FieldPath::default().field("text")
}

/// Pattern-only compliance result for every text in a campaign
pub fn scan_document(document: &Campaign, config: &JurisdictionConfig) -> ComplianceResult {
    let texts = document.extract();
    let findings = scan(&texts, config);
    let paths: Vec<FieldPath> = texts.into_iter().map(|t| t.path).collect();

    reconcile(
        RuleSet::Compliance,
        &paths,
        findings,
        None,
        RewriteStatus::NotAttempted,
        &config.categories(),
    )
}
