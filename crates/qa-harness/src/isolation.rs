//! Cross-jurisdiction isolation checks
//!
//! Text written for one state is re-scanned against another state's
//! registry. Federal and industry findings are expected to fire everywhere.
//! Any finding whose citation classifies as a state statute is a leak: a
//! state-specific rule fired on copy authored for a different jurisdiction.

use crate::corpus::TestCase;
use crate::layers::{citing_state, classify_legal_layer, LegalLayer};
use compliance_engine::{ComplianceEngine, State};
use serde::{Deserialize, Serialize};
use shared_types::{Category, FieldPath, Finding};
use tracing::{info, warn};

/// A state rule that fired outside its state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateLeak {
    pub path: FieldPath,
    pub term: String,
    pub category: Category,
    pub legal_citation: String,
    /// The state the citation belongs to, when its marker is recognised
    pub cited_state: Option<State>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsolationResult {
    pub source: State,
    pub tested: State,
    pub leaks: Vec<StateLeak>,
    pub passed: bool,
}

/// Flag every state-layer finding as a leak
///
/// `findings` are the result of scanning `source`-authored text with the
/// `tested` registry, so a state-layer hit (usually `tested`'s own statute)
/// is a rule firing outside the jurisdiction the copy was written for.
pub fn run_cross_jurisdiction_isolation(
    findings: &[Finding],
    source: State,
    tested: State,
) -> IsolationResult {
    let leaks: Vec<StateLeak> = findings
        .iter()
        .filter(|f| classify_legal_layer(&f.legal_citation) == LegalLayer::State)
        .map(|f| StateLeak {
            path: f.path.clone(),
            term: f.term.clone(),
            category: f.category,
            legal_citation: f.legal_citation.clone(),
            cited_state: citing_state(&f.legal_citation),
        })
        .collect();

    for leak in &leaks {
        warn!(
            source = %source,
            tested = %tested,
            term = %leak.term,
            citation = %leak.legal_citation,
            "State rule leaked across jurisdictions"
        );
    }

    IsolationResult {
        source,
        tested,
        passed: leaks.is_empty(),
        leaks,
    }
}

/// Re-scan `text` with the `tested` registry and check isolation
///
/// `None` if `tested` has no configuration.
pub fn rescan_isolation(
    engine: &ComplianceEngine,
    text: &str,
    source: State,
    tested: State,
) -> Option<IsolationResult> {
    let config = engine.registry().config(tested)?;
    let findings = engine.scan_one(text, &config.state.to_string())?;
    Some(run_cross_jurisdiction_isolation(&findings, source, tested))
}

/// Re-scan every case against every other configured state
///
/// Cases whose own state is not configured are skipped.
pub fn run_isolation_matrix(engine: &ComplianceEngine, cases: &[TestCase]) -> Vec<IsolationResult> {
    let states: Vec<State> = engine.registry().states().collect();
    let mut results = Vec::new();

    for case in cases {
        let Some(source) = State::parse_code(&case.state).filter(|s| states.contains(s)) else {
            warn!(case = %case.id, state = %case.state, "Skipping isolation for unsupported state");
            continue;
        };
        for tested in states.iter().copied().filter(|s| *s != source) {
            if let Some(result) = rescan_isolation(engine, &case.text, source, tested) {
                results.push(result);
            }
        }
    }

    let leaks: usize = results.iter().map(|r| r.leaks.len()).sum();
    info!(checks = results.len(), leaks, "Isolation matrix finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_engine::states::ohio::OHIO_CIVIL_RIGHTS_LAW;
    use shared_types::{FindingSource, Severity};

    fn finding(term: &str, citation: &str) -> Finding {
        Finding {
            path: FieldPath::default().field("text"),
            term: term.to_string(),
            category: Category::MilitaryStatus,
            severity: Severity::Hard,
            explanation: String::new(),
            legal_citation: citation.to_string(),
            suggested_alternative: String::new(),
            matched_span: None,
            is_contextual: false,
            source: FindingSource::Pattern,
            auto_fixed: false,
        }
    }

    #[test]
    fn test_foreign_state_citation_is_a_leak() {
        let findings = vec![finding("no military", OHIO_CIVIL_RIGHTS_LAW)];
        let result = run_cross_jurisdiction_isolation(&findings, State::OH, State::MT);

        assert!(!result.passed);
        assert_eq!(result.leaks.len(), 1);
        assert_eq!(result.leaks[0].cited_state, Some(State::OH));
    }

    #[test]
    fn test_federal_and_industry_never_leak() {
        let findings = vec![
            finding("no children", "42 U.S.C. § 3604(c)"),
            finding("master", "MLS Fair Housing Advertising Guidance"),
        ];
        let result = run_cross_jurisdiction_isolation(&findings, State::OH, State::MT);
        assert!(result.passed);
    }

    #[test]
    fn test_tested_states_own_rule_is_a_leak() {
        let findings = vec![finding("no military", OHIO_CIVIL_RIGHTS_LAW)];
        let result = run_cross_jurisdiction_isolation(&findings, State::MT, State::OH);
        assert!(!result.passed);
        assert_eq!(result.leaks[0].cited_state, Some(State::OH));
    }

    #[test]
    fn test_montana_rule_fires_on_ohio_copy() {
        let engine = ComplianceEngine::new();
        let result =
            rescan_isolation(&engine, "Ohio condo for mature adults", State::OH, State::MT).unwrap();

        assert!(!result.passed);
        assert_eq!(result.leaks.len(), 1);
        assert_eq!(result.leaks[0].term, "mature adults");
        assert_eq!(result.leaks[0].category, Category::Age);
        assert_eq!(result.leaks[0].cited_state, Some(State::MT));
    }

    #[test]
    fn test_rescan_ohio_text_in_montana() {
        let engine = ComplianceEngine::new();
        let result = rescan_isolation(
            &engine,
            "No military tenants near this family-friendly park",
            State::OH,
            State::MT,
        )
        .unwrap();
        // family-friendly is federal and still fires; the Ohio rule does not
        assert!(result.passed);

        assert!(rescan_isolation(&engine, "x", State::OH, State::TX).is_none());
    }
}
