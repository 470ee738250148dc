//! Case-preserving term substitution
//!
//! Every function here returns a new [`Campaign`]; the input is never
//! modified. Writes go through the campaign's path addressing, so a bad path
//! skips one leaf instead of failing the batch.

use crate::formatting::fix_formatting;
use crate::reconcile::ComplianceResult;
use crate::terms::build_term_regex;
use shared_types::{Campaign, Category, FieldPath, Finding, Fix, Severity};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Replace the first match of the finding's term with its alternative
///
/// The replacement copies the casing of the matched text. Text that no
/// longer contains the term is returned unchanged.
pub fn apply_fix(text: &str, finding: &Finding) -> String {
    if finding.category == Category::Formatting {
        return fix_formatting(text);
    }

    let alternative = finding.suggested_alternative.as_str();
    if alternative.trim().is_empty() {
        return text.to_string();
    }

    let regex = match build_term_regex(&finding.term) {
        Ok(regex) => regex,
        Err(e) => {
            warn!(term = %finding.term, error = %e, "Cannot build matcher for fix");
            return text.to_string();
        }
    };

    match regex.find(text) {
        Some(m) => format!(
            "{}{}{}",
            &text[..m.start()],
            match_case(m.as_str(), alternative),
            &text[m.end()..]
        ),
        None => text.to_string(),
    }
}

/// Give `replacement` the casing pattern of `original`
///
/// ALL-CAPS stays all-caps, a leading capital is carried over, anything else
/// uses the replacement as written.
pub fn match_case(original: &str, replacement: &str) -> String {
    let mut letters = original.chars().filter(|c| c.is_alphabetic()).peekable();
    let has_letters = letters.peek().is_some();

    if has_letters && letters.all(char::is_uppercase) {
        return replacement.to_uppercase();
    }

    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    replacement.to_string()
}

/// Apply every finding in `result` to its leaf
///
/// Leaves without findings are not touched.
pub fn auto_fix_document(document: &Campaign, result: &ComplianceResult) -> Campaign {
    let mut by_path: BTreeMap<&FieldPath, Vec<&Finding>> = BTreeMap::new();
    for finding in result.findings() {
        by_path.entry(&finding.path).or_default().push(finding);
    }

    let updates: Vec<(FieldPath, String)> = by_path
        .into_iter()
        .filter_map(|(path, findings)| {
            let Some(original) = document.text_at(path) else {
                warn!(path = %path, "Skipping auto-fix for unknown path");
                return None;
            };
            let fixed = findings
                .iter()
                .fold(original.to_string(), |text, finding| apply_fix(&text, finding));
            (fixed != original).then(|| (path.clone(), fixed))
        })
        .collect();

    document.with_texts(updates).0
}

/// Result of an auto-fix pass over a list of findings
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub document: Campaign,
    /// Every input finding; those whose substitution changed their leaf are
    /// marked `auto_fixed`
    pub findings: Vec<Finding>,
    pub fixes: Vec<Fix>,
}

/// Substitute alternatives for soft findings only
///
/// Hard findings are returned as they are. A soft finding is marked
/// `auto_fixed` only when the substitution actually changed the leaf.
pub fn auto_fix_soft(document: &Campaign, findings: Vec<Finding>) -> FixOutcome {
    fix_findings(document, findings, |f| f.severity == Severity::Soft)
}

/// Substitute alternatives for every finding, hard ones included
///
/// Used for quality findings, where required rules (repeated punctuation,
/// filler phrases) have a safe mechanical correction.
pub fn auto_fix_all(document: &Campaign, findings: Vec<Finding>) -> FixOutcome {
    fix_findings(document, findings, |_| true)
}

fn fix_findings(
    document: &Campaign,
    findings: Vec<Finding>,
    eligible: impl Fn(&Finding) -> bool,
) -> FixOutcome {
    let mut texts: BTreeMap<FieldPath, String> = BTreeMap::new();
    let mut fixes = Vec::new();
    let mut settled = Vec::with_capacity(findings.len());

    for mut finding in findings {
        if !eligible(&finding) {
            settled.push(finding);
            continue;
        }

        let current = match texts.get(&finding.path) {
            Some(text) => text.clone(),
            None => match document.text_at(&finding.path) {
                Some(text) => text.to_string(),
                None => {
                    warn!(path = %finding.path, "Skipping auto-fix for unknown path");
                    settled.push(finding);
                    continue;
                }
            },
        };

        let fixed = apply_fix(&current, &finding);
        if fixed != current {
            debug!(
                path = %finding.path,
                term = %finding.term,
                severity = ?finding.severity,
                "Auto-fixed finding"
            );
            fixes.push(Fix {
                path: finding.path.clone(),
                before: current,
                after: fixed.clone(),
                term: Some(finding.term.clone()),
                category: Some(finding.category),
            });
            texts.insert(finding.path.clone(), fixed);
            finding.auto_fixed = true;
        }
        settled.push(finding);
    }

    let (document, _) = document.with_texts(texts);
    FixOutcome {
        document,
        findings: settled,
        fixes,
    }
}

/// Apply oracle before/after fixes
///
/// A fix applies when its `before` text occurs in the leaf; the first
/// occurrence is replaced. Fixes that do not fit are logged and skipped.
/// Returns the new campaign and the fixes that were applied.
pub fn apply_oracle_fixes(document: &Campaign, fixes: &[Fix]) -> (Campaign, Vec<Fix>) {
    let mut texts: BTreeMap<FieldPath, String> = BTreeMap::new();
    let mut applied = Vec::new();

    for fix in fixes {
        let current = match texts.get(&fix.path) {
            Some(text) => text.clone(),
            None => match document.text_at(&fix.path) {
                Some(text) => text.to_string(),
                None => {
                    warn!(path = %fix.path, "Skipping oracle fix for unknown path");
                    continue;
                }
            },
        };

        if fix.before.is_empty() || !current.contains(&fix.before) {
            warn!(path = %fix.path, "Skipping oracle fix whose original text is not in the field");
            continue;
        }

        texts.insert(fix.path.clone(), current.replacen(&fix.before, &fix.after, 1));
        applied.push(fix.clone());
    }

    (document.with_texts(texts).0, applied)
}
