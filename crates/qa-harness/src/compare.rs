//! Expected-versus-actual diff for labeled cases

use serde::{Deserialize, Serialize};
use shared_types::{Category, Finding};
use std::collections::BTreeSet;

/// A labeled finding: the term and the category it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedFinding {
    pub term: String,
    pub category: Category,
}

impl ExpectedFinding {
    pub fn new(term: impl Into<String>, category: Category) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }

    fn key(&self) -> (String, Category) {
        (normalize(&self.term), self.category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MismatchKind {
    /// Expected but not found
    Missed,
    /// Found but not expected
    FalsePositive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub term: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub passed: bool,
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    pub fn missed(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.kind == MismatchKind::Missed)
    }

    pub fn false_positives(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.kind == MismatchKind::FalsePositive)
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Diff on (term, category), terms compared case-insensitively
///
/// Each pair is reported at most once however many fields it appeared in.
/// Missed pairs come first, in expected order, then false positives in
/// actual order.
pub fn compare_findings(expected: &[ExpectedFinding], actual: &[Finding]) -> Comparison {
    let expected_keys: BTreeSet<(String, Category)> =
        expected.iter().map(ExpectedFinding::key).collect();
    let actual_keys: BTreeSet<(String, Category)> = actual
        .iter()
        .map(|f| (normalize(&f.term), f.category))
        .collect();

    let mut seen = BTreeSet::new();
    let mut mismatches = Vec::new();

    for e in expected {
        let key = e.key();
        if !actual_keys.contains(&key) && seen.insert(key) {
            mismatches.push(Mismatch {
                kind: MismatchKind::Missed,
                term: e.term.clone(),
                category: e.category,
            });
        }
    }

    for f in actual {
        let key = (normalize(&f.term), f.category);
        if !expected_keys.contains(&key) && seen.insert(key) {
            mismatches.push(Mismatch {
                kind: MismatchKind::FalsePositive,
                term: f.term.clone(),
                category: f.category,
            });
        }
    }

    Comparison {
        passed: mismatches.is_empty(),
        mismatches,
    }
}
