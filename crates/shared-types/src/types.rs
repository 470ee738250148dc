use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a compliance term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must not be published
    Hard,
    /// Should be reworded
    Soft,
}

/// Priority of a copywriting quality rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Required,
    Recommended,
}

// Quality findings travel through the same reconciliation code as compliance
// findings: required blocks like hard, recommended is advisory like soft.
impl From<Priority> for Severity {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Required => Severity::Hard,
            Priority::Recommended => Severity::Soft,
        }
    }
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Hard => Priority::Required,
            Severity::Soft => Priority::Recommended,
        }
    }
}

/// Closed set of rule categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    // Compliance
    Steering,
    FamilialStatus,
    Disability,
    RaceColorNationalOrigin,
    Religion,
    SexGender,
    Age,
    MaritalStatus,
    Creed,
    MilitaryStatus,
    EconomicExclusion,
    MisleadingClaims,
    // Quality
    VaguePraise,
    Euphemism,
    WeakCta,
    Formatting,
}

impl Category {
    /// Every compliance category, in reporting order
    pub const COMPLIANCE: [Category; 12] = [
        Category::Steering,
        Category::FamilialStatus,
        Category::Disability,
        Category::RaceColorNationalOrigin,
        Category::Religion,
        Category::SexGender,
        Category::Age,
        Category::MaritalStatus,
        Category::Creed,
        Category::MilitaryStatus,
        Category::EconomicExclusion,
        Category::MisleadingClaims,
    ];

    pub const QUALITY: [Category; 4] = [
        Category::VaguePraise,
        Category::Euphemism,
        Category::WeakCta,
        Category::Formatting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Steering => "steering",
            Category::FamilialStatus => "familial-status",
            Category::Disability => "disability",
            Category::RaceColorNationalOrigin => "race-color-national-origin",
            Category::Religion => "religion",
            Category::SexGender => "sex-gender",
            Category::Age => "age",
            Category::MaritalStatus => "marital-status",
            Category::Creed => "creed",
            Category::MilitaryStatus => "military-status",
            Category::EconomicExclusion => "economic-exclusion",
            Category::MisleadingClaims => "misleading-claims",
            Category::VaguePraise => "vague-praise",
            Category::Euphemism => "euphemism",
            Category::WeakCta => "weak-cta",
            Category::Formatting => "formatting",
        }
    }

    pub fn is_quality(&self) -> bool {
        Category::QUALITY.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse: case-insensitive, `_` and spaces accepted in place of `-`
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Category::COMPLIANCE
            .iter()
            .chain(Category::QUALITY.iter())
            .find(|c| c.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Where a finding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSource {
    /// Deterministic term matching
    Pattern,
    /// Contextual oracle
    Oracle,
}

/// Location of a term match inside a leaf's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSpan {
    /// UTF-8 byte offset of the match start
    pub start: usize,
    /// Matched text exactly as it appears in the source
    pub text: String,
}

/// A single compliance or quality violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub path: FieldPath,
    pub term: String,
    pub category: Category,
    pub severity: Severity,
    pub explanation: String,
    pub legal_citation: String,
    pub suggested_alternative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_span: Option<MatchedSpan>,
    /// Only a contextual reader could have caught this
    #[serde(default)]
    pub is_contextual: bool,
    pub source: FindingSource,
    /// Set once the auto-fix engine has substituted the alternative
    #[serde(default)]
    pub auto_fixed: bool,
}

impl Finding {
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

/// Before/after text tied to a leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub path: FieldPath,
    pub before: String,
    pub after: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Campaign-level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Compliant,
    NeedsReview,
    NonCompliant,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Compliant => "compliant",
            Verdict::NeedsReview => "needs-review",
            Verdict::NonCompliant => "non-compliant",
        };
        f.write_str(label)
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "compliant" => Ok(Verdict::Compliant),
            "needs-review" => Ok(Verdict::NeedsReview),
            "non-compliant" => Ok(Verdict::NonCompliant),
            other => Err(format!("unknown verdict: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!(
            "Familial_Status".parse::<Category>(),
            Ok(Category::FamilialStatus)
        );
        assert_eq!(
            "race color national origin".parse::<Category>(),
            Ok(Category::RaceColorNationalOrigin)
        );
        assert_eq!("weak-cta".parse::<Category>(), Ok(Category::WeakCta));
        assert!("zoning".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_matches_display() {
        for category in Category::COMPLIANCE.iter().chain(Category::QUALITY.iter()) {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_priority_maps_onto_severity() {
        assert_eq!(Severity::from(Priority::Required), Severity::Hard);
        assert_eq!(Severity::from(Priority::Recommended), Severity::Soft);
        assert_eq!(Priority::from(Severity::Soft), Priority::Recommended);
    }

    #[test]
    fn test_verdict_round_trips_through_strings() {
        for verdict in [Verdict::Compliant, Verdict::NeedsReview, Verdict::NonCompliant] {
            assert_eq!(verdict.to_string().parse::<Verdict>(), Ok(verdict));
        }
        assert_eq!("NEEDS_REVIEW".parse::<Verdict>(), Ok(Verdict::NeedsReview));
    }
}
