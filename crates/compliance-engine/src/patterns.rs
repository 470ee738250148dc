//! Benign-collocation allowlist and context helpers
//!
//! Bare words like "family" or "master" show up constantly in legitimate
//! listing copy ("family room", "master bedroom"). A term match is dropped
//! when one of the collocations keyed by any of the term's words appears in
//! the text around the match. This is a hand-curated exception table, not a
//! disambiguator: it trades some recall for an acceptable false-positive rate.

use crate::terms::build_term_regex;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Characters of context examined on each side of a match
pub const CONTEXT_RADIUS: usize = 20;

/// Collocations that make a matched word benign, keyed by that word
pub const ALLOWED_COLLOCATIONS: &[(&str, &[&str])] = &[
    (
        "family",
        &["family room", "family dining", "single family", "family kitchen"],
    ),
    (
        "master",
        &[
            "master bedroom",
            "master suite",
            "master bath",
            "master bathroom",
            "master closet",
            "master planned",
        ],
    ),
    (
        "walk",
        &["walk-in closet", "walk-in pantry", "walk-in shower"],
    ),
    (
        "single",
        &["single story", "single family", "single level", "single car"],
    ),
    (
        "private",
        &[
            "private backyard",
            "private yard",
            "private patio",
            "private deck",
            "private entrance",
            "private office",
        ],
    ),
    ("restricted", &["deed restricted", "deed restrictions"]),
];

lazy_static! {
    static ref COLLOCATION_PATTERNS: HashMap<&'static str, Vec<Regex>> = ALLOWED_COLLOCATIONS
        .iter()
        .map(|(word, phrases)| {
            let patterns = phrases
                .iter()
                .filter_map(|phrase| build_term_regex(phrase).ok())
                .collect();
            (*word, patterns)
        })
        .collect();
}

/// Slice of `text` spanning `radius` characters either side of `start..end`
///
/// Offsets are byte offsets on char boundaries; the window never splits a
/// character.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let (from, to) = window_bounds(text, start, end, radius);
    &text[from..to]
}

fn window_bounds(text: &str, start: usize, end: usize, radius: usize) -> (usize, usize) {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    (from, to)
}

/// True if the match at `start..end` sits inside a benign collocation for
/// any of `words`
pub fn is_allowlisted(text: &str, start: usize, end: usize, words: &[String]) -> bool {
    let window = context_window(text, start, end, CONTEXT_RADIUS);
    words.iter().any(|word| {
        COLLOCATION_PATTERNS
            .get(word.as_str())
            .is_some_and(|patterns| patterns.iter().any(|p| p.is_match(window)))
    })
}

/// Extract a snippet around a match (50 characters of context each side)
pub fn extract_snippet(text: &str, start: usize, end: usize) -> String {
    let (from, to) = window_bounds(text, start, end, 50);
    let lead = if from > 0 { "..." } else { "" };
    let tail = if to < text.len() { "..." } else { "" };
    format!("{}{}{}", lead, text[from..to].trim(), tail)
}
