pub mod autofix;
pub mod constraints;
pub mod formatting;
pub mod jurisdiction;
pub mod layers;
pub mod patterns;
pub mod quality;
pub mod reconcile;
pub mod scanner;
pub mod states;
pub mod terms;

pub use autofix::{apply_fix, auto_fix_document};
pub use jurisdiction::{JurisdictionConfig, Registry, State};
pub use reconcile::{ComplianceResult, OracleReport, PlatformResult, RewriteStatus, RuleSet};

use shared_types::{Campaign, FieldPath, Finding};
use std::collections::BTreeSet;

/// ComplianceEngine entry point
///
/// Owns the jurisdiction registry; every scan is a pure function of the
/// registry and its input.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    registry: Registry,
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn jurisdiction(&self, code: &str) -> Option<&JurisdictionConfig> {
        self.registry.get(code)
    }

    /// Scan ad-hoc text; `None` if the jurisdiction is unknown
    pub fn scan_one(&self, text: &str, code: &str) -> Option<Vec<Finding>> {
        scanner::scan_one(&self.registry, text, code)
    }

    /// Pattern-only compliance result for a whole campaign
    pub fn scan_document(&self, document: &Campaign, config: &JurisdictionConfig) -> ComplianceResult {
        scanner::scan_document(document, config)
    }

    /// Pattern-only quality result for a whole campaign
    pub fn scan_quality(&self, document: &Campaign) -> ComplianceResult {
        let texts = document.extract_ad_copy();
        let findings = self.registry.quality().scan(&texts);
        let paths: Vec<FieldPath> = texts.into_iter().map(|t| t.path).collect();
        reconcile::reconcile(
            RuleSet::Quality,
            &paths,
            findings,
            None,
            RewriteStatus::NotAttempted,
            &BTreeSet::new(),
        )
    }

    /// Check raw text against a jurisdiction and the quality rules together
    pub fn check_text(&self, text: &str, code: &str) -> Option<Vec<Finding>> {
        let mut findings = self.scan_one(text, code)?;
        let texts = [shared_types::ExtractedText {
            path: scanner::ad_hoc_path(),
            text: text.to_string(),
        }];
        findings.extend(self.registry.quality().scan(&texts));
        Some(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Category, Severity, Verdict};

    #[test]
    fn test_engine_detects_multiple_violations() {
        let engine = ComplianceEngine::new();
        let findings = engine
            .scan_one("Exclusive neighborhood, adults only, no section 8", "CA")
            .unwrap();
        assert!(findings.len() >= 3);
    }

    #[test]
    fn test_engine_rejects_unknown_jurisdiction() {
        let engine = ComplianceEngine::new();
        assert!(engine.scan_one("anything", "XX").is_none());
        assert!(engine.check_text("anything", "XX").is_none());
    }

    #[test]
    fn test_state_terms_stay_in_their_state() {
        let engine = ComplianceEngine::new();
        let text = "No military tenants please";
        assert!(engine
            .scan_one(text, "OH")
            .unwrap()
            .iter()
            .any(|f| f.category == Category::MilitaryStatus));
        assert!(engine
            .scan_one(text, "MT")
            .unwrap()
            .iter()
            .all(|f| f.category != Category::MilitaryStatus));
    }

    #[test]
    fn test_check_text_includes_quality() {
        let engine = ComplianceEngine::new();
        let findings = engine.check_text("Stunning home, adults only!!", "FL").unwrap();
        assert!(findings.iter().any(|f| f.category == Category::VaguePraise));
        assert!(findings.iter().any(|f| f.category == Category::Formatting));
        assert!(findings
            .iter()
            .any(|f| f.category == Category::FamilialStatus && f.severity == Severity::Hard));
    }

    #[test]
    fn test_scan_quality_skips_strategy_fields() {
        let engine = ComplianceEngine::new();
        let document = Campaign {
            twitter: Some("Sunny home near the park.".to_string()),
            hashtags: vec!["#StunningViews".to_string(), "stunning".to_string()],
            ..Default::default()
        };
        let result = engine.scan_quality(&document);
        assert_eq!(result.rule_set, RuleSet::Quality);
        assert_eq!(result.platforms.len(), 1);
        assert_eq!(result.verdict, Verdict::Compliant);
    }
}
