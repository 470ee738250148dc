//! Copywriting quality rules
//!
//! Jurisdiction-independent anti-patterns: vague praise, euphemisms that
//! buyers read as red flags, weak calls to action, and formatting noise.
//! Priorities map onto severities (required → hard, recommended → soft) so
//! quality findings flow through the same reconciliation code.

use crate::formatting::shouted_words;
use crate::scanner::scan_terms;
use crate::terms::{compile_terms, Term, TermDef, TermPattern, QUALITY_REFERENCE};
use shared_types::{Category, ExtractedText, Finding, FindingSource, MatchedSpan, Priority, Severity};

pub const QUALITY_TERMS: &[TermDef] = &[
    // Vague praise
    TermDef::quality(
        "stunning",
        TermPattern::Phrase,
        Category::VaguePraise,
        Priority::Recommended,
        "Say what is striking about the home instead.",
        "striking",
    ),
    TermDef::quality(
        "must see",
        TermPattern::Phrase,
        Category::VaguePraise,
        Priority::Recommended,
        "Filler that every listing claims.",
        "worth a visit",
    ),
    TermDef::quality(
        "dream home",
        TermPattern::Phrase,
        Category::VaguePraise,
        Priority::Recommended,
        "Generic; name the features that make it special.",
        "well-appointed home",
    ),
    TermDef::quality(
        "boasts",
        TermPattern::Phrase,
        Category::VaguePraise,
        Priority::Recommended,
        "Overused listing verb.",
        "features",
    ),
    // Euphemism
    TermDef::quality(
        "cozy",
        TermPattern::Phrase,
        Category::Euphemism,
        Priority::Recommended,
        "Buyers read this as small.",
        "efficiently designed",
    ),
    TermDef::quality(
        "needs tlc",
        TermPattern::Phrase,
        Category::Euphemism,
        Priority::Required,
        "Be specific about condition.",
        "priced to reflect needed updates",
    ),
    TermDef::quality(
        "motivated seller",
        TermPattern::Phrase,
        Category::Euphemism,
        Priority::Recommended,
        "Weakens the seller's negotiating position.",
        "priced to sell",
    ),
    // Weak calls to action
    TermDef::quality(
        "call for more info",
        TermPattern::Phrase,
        Category::WeakCta,
        Priority::Recommended,
        "Passive; invite a concrete next step.",
        "schedule your private showing",
    ),
    TermDef::quality(
        "don't miss out",
        TermPattern::Phrase,
        Category::WeakCta,
        Priority::Recommended,
        "Pressure without a concrete next step.",
        "book a tour",
    ),
    // Formatting
    TermDef::quality(
        r"!{2,}",
        TermPattern::Regex,
        Category::Formatting,
        Priority::Required,
        "Repeated exclamation marks read as spam.",
        "!",
    ),
    TermDef::quality(
        r"\.{4,}",
        TermPattern::Regex,
        Category::Formatting,
        Priority::Recommended,
        "Use a standard ellipsis.",
        "...",
    ),
];

/// Explanation attached to ALL-CAPS findings
pub const SHOUTING_EXPLANATION: &str = "ALL-CAPS words read as shouting; use title case.";

/// Compiled quality rules
#[derive(Debug, Clone)]
pub struct QualityRules {
    pub terms: Vec<Term>,
}

impl QualityRules {
    pub fn builtin() -> Self {
        Self {
            terms: compile_terms(&[QUALITY_TERMS]),
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        Category::QUALITY.to_vec()
    }

    /// Term rules plus the ALL-CAPS detector
    pub fn scan(&self, texts: &[ExtractedText]) -> Vec<Finding> {
        let mut findings = scan_terms(texts, &self.terms);

        for extracted in texts {
            // First shouted word only, matching the one-finding-per-rule-per-field policy
            if let Some((start, word)) = shouted_words(&extracted.text).into_iter().next() {
                findings.push(Finding {
                    path: extracted.path.clone(),
                    term: word.to_string(),
                    category: Category::Formatting,
                    severity: Severity::from(Priority::Recommended),
                    explanation: SHOUTING_EXPLANATION.to_string(),
                    legal_citation: QUALITY_REFERENCE.to_string(),
                    suggested_alternative: crate::formatting::title_case(word),
                    matched_span: Some(MatchedSpan {
                        start,
                        text: word.to_string(),
                    }),
                    is_contextual: false,
                    source: FindingSource::Pattern,
                    auto_fixed: false,
                });
            }
        }

        findings
    }
}

impl Default for QualityRules {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::FieldPath;

    fn texts(text: &str) -> Vec<ExtractedText> {
        vec![ExtractedText {
            path: FieldPath::default().field("twitter"),
            text: text.to_string(),
        }]
    }

    #[test]
    fn test_quality_rules_compile() {
        assert_eq!(QualityRules::builtin().terms.len(), QUALITY_TERMS.len());
    }

    #[test]
    fn test_detects_vague_praise_and_weak_cta() {
        let findings = QualityRules::builtin().scan(&texts("Stunning views. Call for more info."));
        let categories: Vec<_> = findings.iter().map(|f| f.category).collect();
        assert!(categories.contains(&Category::VaguePraise));
        assert!(categories.contains(&Category::WeakCta));
    }

    #[test]
    fn test_detects_formatting_noise() {
        let findings = QualityRules::builtin().scan(&texts("Open house today!!! Wow....."));
        let formatting: Vec<_> = findings
            .iter()
            .filter(|f| f.category == Category::Formatting)
            .collect();
        assert_eq!(formatting.len(), 2);
        assert!(formatting.iter().any(|f| f.severity == Severity::Hard));
    }

    #[test]
    fn test_detects_shouting_but_not_abbreviations() {
        let rules = QualityRules::builtin();

        let findings = rules.scan(&texts("AMAZING home near the park"));
        let shouting: Vec<_> = findings
            .iter()
            .filter(|f| f.explanation == SHOUTING_EXPLANATION)
            .collect();
        assert_eq!(shouting.len(), 1);
        assert_eq!(shouting[0].term, "AMAZING");
        assert_eq!(shouting[0].suggested_alternative, "Amazing");

        let findings = rules.scan(&texts("Low HOA dues, 2,100 SQFT, see MLS"));
        assert!(findings.is_empty());
    }
}
