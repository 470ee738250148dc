//! Term definitions and regex construction
//!
//! Static tables hold [`TermDef`]s; a jurisdiction compiles them into
//! [`Term`]s once, at registry construction.

use regex::Regex;
use shared_types::{Category, Priority, Severity};
use tracing::warn;

/// How the `term` text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermPattern {
    /// Literal phrase, matched case-insensitively on word boundaries with
    /// spaces and hyphens interchangeable
    Phrase,
    /// Raw regular expression (still case-insensitive)
    Regex,
}

/// Static description of a prohibited term or quality anti-pattern
#[derive(Debug, Clone, Copy)]
pub struct TermDef {
    pub term: &'static str,
    pub pattern: TermPattern,
    pub category: Category,
    pub severity: Severity,
    pub explanation: &'static str,
    pub legal_citation: &'static str,
    pub suggested_alternative: &'static str,
}

impl TermDef {
    /// Compliance phrase
    pub const fn phrase(
        term: &'static str,
        category: Category,
        severity: Severity,
        explanation: &'static str,
        legal_citation: &'static str,
        suggested_alternative: &'static str,
    ) -> Self {
        Self {
            term,
            pattern: TermPattern::Phrase,
            category,
            severity,
            explanation,
            legal_citation,
            suggested_alternative,
        }
    }

    /// Quality rule, phrase or regex
    pub const fn quality(
        term: &'static str,
        pattern: TermPattern,
        category: Category,
        priority: Priority,
        explanation: &'static str,
        suggested_alternative: &'static str,
    ) -> Self {
        let severity = match priority {
            Priority::Required => Severity::Hard,
            Priority::Recommended => Severity::Soft,
        };
        Self {
            term,
            pattern,
            category,
            severity,
            explanation,
            legal_citation: QUALITY_REFERENCE,
            suggested_alternative,
        }
    }
}

/// Citation attached to quality rules (they are house style, not law)
pub const QUALITY_REFERENCE: &str = "Listing copy style guide";

/// A compiled term, ready for scanning
#[derive(Debug, Clone)]
pub struct Term {
    pub term: String,
    pub pattern: TermPattern,
    pub category: Category,
    pub severity: Severity,
    pub explanation: String,
    pub legal_citation: String,
    pub suggested_alternative: String,
    regex: Regex,
}

impl Term {
    pub fn compile(def: &TermDef) -> Result<Self, regex::Error> {
        let regex = match def.pattern {
            TermPattern::Phrase => build_term_regex(def.term)?,
            TermPattern::Regex => build_pattern_regex(def.term)?,
        };
        Ok(Self {
            term: def.term.to_string(),
            pattern: def.pattern,
            category: def.category,
            severity: def.severity,
            explanation: def.explanation.to_string(),
            legal_citation: def.legal_citation.to_string(),
            suggested_alternative: def.suggested_alternative.to_string(),
            regex,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn priority(&self) -> Priority {
        self.severity.into()
    }

    /// Lower-cased words of a phrase term (empty for regex terms)
    pub fn words(&self) -> Vec<String> {
        match self.pattern {
            TermPattern::Phrase => split_words(&self.term)
                .map(|w| w.to_lowercase())
                .collect(),
            TermPattern::Regex => Vec::new(),
        }
    }
}

fn split_words(term: &str) -> impl Iterator<Item = &str> {
    term.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build the matcher for a literal term
///
/// Case-insensitive and anchored on word boundaries. Any run of spaces or
/// hyphens in the term matches any run of spaces or hyphens in the text, so
/// `family-friendly` and `family friendly` are the same term. Boundaries are
/// only asserted next to word characters so terms like `55+` still match.
pub fn build_term_regex(term: &str) -> Result<Regex, regex::Error> {
    let trimmed = term.trim_matches(|c: char| c.is_whitespace() || c == '-');
    let body = split_words(trimmed)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[\s\-]+");

    let lead = if trimmed.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if trimmed.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };

    Regex::new(&format!("(?i){}{}{}", lead, body, trail))
}

/// Build the matcher for a regex-marked term
pub fn build_pattern_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", pattern))
}

/// Compile a set of static tables, skipping (and logging) unusable entries
pub fn compile_terms(tables: &[&[TermDef]]) -> Vec<Term> {
    tables
        .iter()
        .flat_map(|table| table.iter())
        .filter_map(|def| {
            if def.term.trim().is_empty() {
                warn!(category = %def.category, "Skipping empty term definition");
                return None;
            }
            match Term::compile(def) {
                Ok(term) => Some(term),
                Err(e) => {
                    warn!(term = def.term, error = %e, "Skipping term with invalid pattern");
                    None
                }
            }
        })
        .collect()
}
