//! Property-based tests for term matching and auto-fix

use compliance_engine::apply_fix;
use compliance_engine::scanner::scan_terms;
use compliance_engine::terms::{compile_terms, TermDef};
use proptest::prelude::*;
use shared_types::{Category, ExtractedText, FieldPath, Finding, FindingSource, Severity};

const TERM: &str = "exclusive neighborhood";
const ALTERNATIVE: &str = "desirable location";

fn violation() -> Finding {
    Finding {
        path: FieldPath::default().field("twitter"),
        term: TERM.to_string(),
        category: Category::Steering,
        severity: Severity::Hard,
        explanation: String::new(),
        legal_citation: String::new(),
        suggested_alternative: ALTERNATIVE.to_string(),
        matched_span: None,
        is_contextual: false,
        source: FindingSource::Pattern,
        auto_fixed: false,
    }
}

#[derive(Debug, Clone, Copy)]
enum Casing {
    Upper,
    Capitalized,
    Lower,
}

fn casing() -> impl Strategy<Value = Casing> {
    prop_oneof![Just(Casing::Upper), Just(Casing::Capitalized), Just(Casing::Lower)]
}

fn apply_casing(text: &str, casing: Casing) -> String {
    match casing {
        Casing::Upper => text.to_uppercase(),
        Casing::Lower => text.to_lowercase(),
        Casing::Capitalized => {
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

fn filler() -> impl Strategy<Value = String> {
    "[0-9,.]{0,12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Auto-fix
    // ============================================================

    #[test]
    fn apply_fix_is_idempotent(prefix in filler(), suffix in filler(), case in casing()) {
        let text = format!("{} {} {}", prefix, apply_casing(TERM, case), suffix);
        let v = violation();

        let once = apply_fix(&text, &v);
        let twice = apply_fix(&once, &v);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn apply_fix_copies_casing(prefix in filler(), suffix in filler(), case in casing()) {
        let text = format!("{} {} {}", prefix, apply_casing(TERM, case), suffix);
        let fixed = apply_fix(&text, &violation());

        let expected = format!("{} {} {}", prefix, apply_casing(ALTERNATIVE, case), suffix);
        prop_assert_eq!(fixed, expected);
    }

    #[test]
    fn apply_fix_leaves_clean_text_alone(text in "[a-df-z0-9 ,.]{0,60}") {
        // No 'e', so the term cannot appear
        prop_assert_eq!(apply_fix(&text, &violation()), text);
    }

    // ============================================================
    // Matching
    // ============================================================

    #[test]
    fn hyphens_and_spaces_are_interchangeable(separator in "[ -]{1,3}", case in casing()) {
        const TABLE: &[TermDef] = &[TermDef::phrase(
            "family friendly",
            Category::FamilialStatus,
            Severity::Hard,
            "",
            "",
            "welcoming",
        )];
        let terms = compile_terms(&[TABLE]);

        let phrase = apply_casing(&format!("family{}friendly", separator), case);
        let texts = [ExtractedText {
            path: FieldPath::default().field("twitter"),
            text: format!("This is a {} house", phrase),
        }];

        let findings = scan_terms(&texts, &terms);
        prop_assert_eq!(findings.len(), 1);
        prop_assert_eq!(findings[0].term.as_str(), "family friendly");
        prop_assert_eq!(findings[0].category, Category::FamilialStatus);
    }
}
