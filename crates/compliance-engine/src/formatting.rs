//! Regex-only formatting fixes
//!
//! Repeated exclamation marks, over-long ellipses and ALL-CAPS words. None of
//! this consults the contextual oracle.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use shared_types::{Campaign, Category, FieldPath, Finding};
use std::collections::BTreeSet;

lazy_static! {
    static ref REPEATED_EXCLAMATION: Regex = Regex::new(r"!{2,}").unwrap();
    static ref LONG_ELLIPSIS: Regex = Regex::new(r"\.{4,}").unwrap();
    static ref SHOUTED_WORD: Regex = Regex::new(r"\b[A-Z]{3,}\b").unwrap();
}

/// Upper-case words that are legitimate abbreviations in listing copy
pub const CAPS_EXCLUSIONS: &[&str] = &[
    "MLS", "HOA", "SQFT", "HVAC", "ADU", "USA", "FHA", "HUD", "NAR", "REO", "LLC", "BBQ", "DIY",
    "FSBO", "TLC", "VA", "USDA", "EV", "AC", "BR", "BA", "SF", "LED", "ATM", "II", "III", "IV",
    "NYC", "DC", "LA", "SFR", "APR", "HOV", "GPS", "TV", "WIFI", "PUD", "CDD",
];

fn is_excluded(word: &str) -> bool {
    CAPS_EXCLUSIONS.contains(&word)
}

/// ALL-CAPS words (three letters or more) that are not known abbreviations,
/// with their byte offsets
pub fn shouted_words(text: &str) -> Vec<(usize, &str)> {
    SHOUTED_WORD
        .find_iter(text)
        .filter(|m| !is_excluded(m.as_str()))
        .map(|m| (m.start(), m.as_str()))
        .collect()
}

/// "AMAZING" -> "Amazing"
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Collapse `!!`, normalize `....` and title-case shouted words
pub fn fix_formatting(text: &str) -> String {
    let text = REPEATED_EXCLAMATION.replace_all(text, "!");
    let text = LONG_ELLIPSIS.replace_all(&text, "...");
    SHOUTED_WORD
        .replace_all(&text, |caps: &Captures| {
            let word = &caps[0];
            if is_excluded(word) {
                word.to_string()
            } else {
                title_case(word)
            }
        })
        .into_owned()
}

/// Apply [`fix_formatting`] to every leaf with a formatting finding
///
/// Leaves without formatting findings are left as they are.
pub fn auto_fix_formatting(document: &Campaign, findings: &[Finding]) -> Campaign {
    let paths: BTreeSet<&FieldPath> = findings
        .iter()
        .filter(|f| f.category == Category::Formatting)
        .map(|f| &f.path)
        .collect();

    let updates: Vec<(FieldPath, String)> = paths
        .into_iter()
        .filter_map(|path| {
            let text = document.text_at(path)?;
            let fixed = fix_formatting(text);
            (fixed != text).then(|| (path.clone(), fixed))
        })
        .collect();

    document.with_texts(updates).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{FindingSource, Severity};

    #[test]
    fn test_fix_formatting() {
        assert_eq!(fix_formatting("Open house!!!"), "Open house!");
        assert_eq!(fix_formatting("Wait for it....."), "Wait for it...");
        assert_eq!(fix_formatting("Wait for it..."), "Wait for it...");
        assert_eq!(fix_formatting("AMAZING views"), "Amazing views");
    }

    #[test]
    fn test_abbreviations_survive() {
        let text = "Low HOA dues, 2,100 SQFT, new HVAC, see MLS";
        assert_eq!(fix_formatting(text), text);
        assert!(shouted_words(text).is_empty());
    }

    #[test]
    fn test_short_caps_are_not_shouting() {
        assert!(shouted_words("A 2BR home, OK for pets").is_empty());
    }

    #[test]
    fn test_shouted_words_report_offsets() {
        let words = shouted_words("Big HOUSE, big YARD");
        assert_eq!(words, vec![(4, "HOUSE"), (15, "YARD")]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("GORGEOUS"), "Gorgeous");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_auto_fix_formatting_touches_only_flagged_leaves() {
        let document = Campaign {
            twitter: Some("HUGE yard!!".to_string()),
            linkedin: Some("HUGE yard!!".to_string()),
            ..Default::default()
        };
        let finding = Finding {
            path: "twitter".parse().unwrap(),
            term: "!{2,}".to_string(),
            category: Category::Formatting,
            severity: Severity::Hard,
            explanation: String::new(),
            legal_citation: String::new(),
            suggested_alternative: "!".to_string(),
            matched_span: None,
            is_contextual: false,
            source: FindingSource::Pattern,
            auto_fixed: false,
        };

        let fixed = auto_fix_formatting(&document, &[finding]);
        assert_eq!(fixed.twitter.as_deref(), Some("Huge yard!"));
        assert_eq!(fixed.linkedin.as_deref(), Some("HUGE yard!!"));
        assert_eq!(document.twitter.as_deref(), Some("HUGE yard!!"));
    }
}
