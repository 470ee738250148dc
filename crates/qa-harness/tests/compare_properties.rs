//! Property-based tests for the expected-versus-actual diff

use proptest::prelude::*;
use qa_harness::{compare_findings, ExpectedFinding, MismatchKind};
use shared_types::{Category, FieldPath, Finding, FindingSource, Severity};

fn category() -> impl Strategy<Value = Category> {
    proptest::sample::select(Category::COMPLIANCE.to_vec())
}

fn label_list() -> impl Strategy<Value = Vec<(String, Category)>> {
    proptest::collection::vec(("[a-z]{3,8}( [a-z]{3,8})?", category()), 0..6)
}

fn finding(term: &str, category: Category) -> Finding {
    Finding {
        path: FieldPath::default().field("text"),
        term: term.to_string(),
        category,
        severity: Severity::Hard,
        explanation: String::new(),
        legal_citation: String::new(),
        suggested_alternative: String::new(),
        matched_span: None,
        is_contextual: false,
        source: FindingSource::Pattern,
        auto_fixed: false,
    }
}

proptest! {
    #[test]
    fn identical_labels_always_pass(labels in label_list()) {
        let expected: Vec<ExpectedFinding> = labels
            .iter()
            .map(|(term, category)| ExpectedFinding::new(term.clone(), *category))
            .collect();
        // Casing differs between the label and the engine's report
        let actual: Vec<Finding> = labels
            .iter()
            .map(|(term, category)| finding(&term.to_uppercase(), *category))
            .collect();

        let comparison = compare_findings(&expected, &actual);
        prop_assert!(comparison.passed);
        prop_assert!(comparison.mismatches.is_empty());
    }

    #[test]
    fn empty_actual_misses_every_distinct_label(labels in label_list()) {
        let expected: Vec<ExpectedFinding> = labels
            .iter()
            .map(|(term, category)| ExpectedFinding::new(term.clone(), *category))
            .collect();
        let distinct: std::collections::BTreeSet<_> = labels.iter().cloned().collect();

        let comparison = compare_findings(&expected, &[]);
        prop_assert_eq!(comparison.passed, distinct.is_empty());
        prop_assert_eq!(comparison.missed().count(), distinct.len());
        prop_assert!(comparison
            .mismatches
            .iter()
            .all(|m| m.kind == MismatchKind::Missed));
    }
}
