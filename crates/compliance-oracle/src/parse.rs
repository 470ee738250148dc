//! Parse and validate oracle answers
//!
//! The oracle's JSON is untrusted. It is deserialized into loose `Raw*`
//! shapes first, then every field the pipeline depends on is checked before
//! it becomes a typed [`OracleReport`]. A missing top-level field fails the
//! whole answer; a bad individual finding or fix is logged and skipped.

use crate::error::OracleFailure;
use compliance_engine::OracleReport;
use serde::{Deserialize, Serialize};
use shared_types::{Category, FieldPath, Finding, FindingSource, Fix, Priority, Severity, Verdict};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawReport {
    verdict: Option<String>,
    platforms: Option<Vec<RawPlatform>>,
    #[serde(default)]
    fixes: Vec<RawFix>,
}

#[derive(Debug, Deserialize)]
struct RawPlatform {
    path: Option<String>,
    passed: Option<bool>,
    #[serde(default)]
    violations: Vec<RawViolation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawViolation {
    term: Option<String>,
    category: Option<String>,
    severity: Option<String>,
    priority: Option<String>,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    legal_citation: String,
    #[serde(default)]
    suggested_alternative: String,
    #[serde(default)]
    is_contextual: bool,
}

#[derive(Debug, Deserialize)]
struct RawFix {
    path: Option<String>,
    before: Option<String>,
    after: Option<String>,
    term: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    overall: Option<f64>,
    #[serde(default)]
    platforms: Vec<RawPlatformScore>,
}

#[derive(Debug, Deserialize)]
struct RawPlatformScore {
    path: Option<String>,
    score: Option<f64>,
}

/// Copy quality score, 0-100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub overall: u8,
    pub platforms: BTreeMap<FieldPath, u8>,
}

/// Slice out the JSON object, tolerating code fences and chatter around it
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn decode<'a, T: Deserialize<'a>>(raw: &'a str) -> Result<T, OracleFailure> {
    let json = extract_json(raw).ok_or_else(|| OracleFailure::NotJson("no JSON object found".to_string()))?;
    serde_json::from_str(json).map_err(|e| OracleFailure::NotJson(e.to_string()))
}

fn parse_severity(violation: &RawViolation) -> Option<Severity> {
    if let Some(severity) = &violation.severity {
        return match severity.trim().to_lowercase().as_str() {
            "hard" => Some(Severity::Hard),
            "soft" => Some(Severity::Soft),
            "required" => Some(Priority::Required.into()),
            "recommended" => Some(Priority::Recommended.into()),
            _ => None,
        };
    }
    match violation.priority.as_deref()?.trim().to_lowercase().as_str() {
        "required" => Some(Priority::Required.into()),
        "recommended" => Some(Priority::Recommended.into()),
        _ => None,
    }
}

fn parse_path(raw: Option<&str>) -> Option<FieldPath> {
    let raw = raw?;
    match raw.parse::<FieldPath>() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(path = raw, error = %e, "Skipping oracle entry with malformed path");
            None
        }
    }
}

fn validate_violation(path: &FieldPath, raw: RawViolation) -> Option<Finding> {
    let Some(term) = raw.term.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        warn!(path = %path, "Skipping oracle violation without a term");
        return None;
    };
    let category = match raw.category.as_deref().map(str::parse::<Category>) {
        Some(Ok(category)) => category,
        Some(Err(e)) => {
            warn!(path = %path, term, error = %e, "Skipping oracle violation with unknown category");
            return None;
        }
        None => {
            warn!(path = %path, term, "Skipping oracle violation without a category");
            return None;
        }
    };
    let Some(severity) = parse_severity(&raw) else {
        warn!(path = %path, term, "Skipping oracle violation without a usable severity");
        return None;
    };

    Some(Finding {
        path: path.clone(),
        term: term.to_string(),
        category,
        severity,
        explanation: raw.explanation,
        legal_citation: raw.legal_citation,
        suggested_alternative: raw.suggested_alternative,
        matched_span: None,
        is_contextual: raw.is_contextual,
        source: FindingSource::Oracle,
        auto_fixed: false,
    })
}

fn validate_fix(raw: RawFix) -> Option<Fix> {
    let path = parse_path(raw.path.as_deref())?;
    let (Some(before), Some(after)) = (raw.before, raw.after) else {
        warn!(path = %path, "Skipping oracle fix without before/after text");
        return None;
    };
    let category = raw.category.as_deref().and_then(|c| c.parse::<Category>().ok());
    Some(Fix {
        path,
        before,
        after,
        term: raw.term,
        category,
    })
}

/// Parse a compliance or quality-check answer
pub fn parse_report(raw: &str) -> Result<OracleReport, OracleFailure> {
    let report: RawReport = decode(raw)?;

    let verdict = report
        .verdict
        .ok_or(OracleFailure::MissingField("verdict"))?
        .parse::<Verdict>()
        .map_err(|reason| OracleFailure::InvalidField {
            field: "verdict",
            reason,
        })?;
    let platforms = report
        .platforms
        .ok_or(OracleFailure::MissingField("platforms"))?;

    let mut findings = Vec::new();
    let mut path_verdicts = BTreeMap::new();

    for platform in platforms {
        let Some(path) = parse_path(platform.path.as_deref()) else {
            continue;
        };
        if let Some(passed) = platform.passed {
            path_verdicts.insert(path.clone(), passed);
        }
        findings.extend(
            platform
                .violations
                .into_iter()
                .filter_map(|v| validate_violation(&path, v)),
        );
    }

    let fixes = report.fixes.into_iter().filter_map(validate_fix).collect();

    Ok(OracleReport {
        findings,
        fixes,
        path_verdicts,
        verdict: Some(verdict),
    })
}

/// Parse a quality-score answer
pub fn parse_score(raw: &str) -> Result<QualityScore, OracleFailure> {
    let score: RawScore = decode(raw)?;
    let overall = score.overall.ok_or(OracleFailure::MissingField("overall"))?;
    let overall = to_score(overall).ok_or_else(|| OracleFailure::InvalidField {
        field: "overall",
        reason: format!("{} is outside 0-100", overall),
    })?;

    let mut platforms = BTreeMap::new();
    for entry in score.platforms {
        let Some(path) = parse_path(entry.path.as_deref()) else {
            continue;
        };
        match entry.score.and_then(to_score) {
            Some(value) => {
                platforms.insert(path, value);
            }
            None => warn!(path = %path, "Skipping platform score outside 0-100"),
        }
    }

    Ok(QualityScore { overall, platforms })
}

fn to_score(value: f64) -> Option<u8> {
    (0.0..=100.0)
        .contains(&value)
        .then(|| value.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ANSWER: &str = r#"```json
{
  "verdict": "non-compliant",
  "platforms": [
    {
      "path": "instagram.casual",
      "passed": false,
      "violations": [
        {
          "term": "perfect for young couples",
          "category": "familial-status",
          "severity": "hard",
          "explanation": "Describes the buyer",
          "legalCitation": "42 U.S.C. § 3604(c)",
          "suggestedAlternative": "ideal starter home",
          "isContextual": true
        },
        { "term": "", "category": "steering", "severity": "hard" },
        { "term": "x", "category": "astrology", "severity": "hard" },
        { "term": "y", "category": "steering" }
      ]
    },
    { "path": "googleAds[", "passed": true },
    { "path": "twitter", "passed": true }
  ],
  "fixes": [
    { "path": "instagram.casual", "before": "perfect for young couples", "after": "ideal starter home", "category": "familial-status" },
    { "path": "twitter", "before": "only before" }
  ]
}
```"#;

    #[test]
    fn test_parse_report_validates_entries() {
        let report = parse_report(ANSWER).unwrap();
        assert_eq!(report.verdict, Some(Verdict::NonCompliant));

        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.path.to_string(), "instagram.casual");
        assert_eq!(finding.category, Category::FamilialStatus);
        assert_eq!(finding.severity, Severity::Hard);
        assert!(finding.is_contextual);
        assert_eq!(finding.source, FindingSource::Oracle);

        assert_eq!(report.path_verdicts.len(), 2);
        assert_eq!(
            report.path_verdicts.get(&"twitter".parse().unwrap()),
            Some(&true)
        );

        assert_eq!(report.fixes.len(), 1);
        assert_eq!(report.fixes[0].category, Some(Category::FamilialStatus));
    }

    #[test]
    fn test_missing_top_level_fields_fail() {
        assert!(matches!(
            parse_report(r#"{"platforms": []}"#),
            Err(OracleFailure::MissingField("verdict"))
        ));
        assert!(matches!(
            parse_report(r#"{"verdict": "compliant"}"#),
            Err(OracleFailure::MissingField("platforms"))
        ));
        assert!(matches!(
            parse_report(r#"{"verdict": "great", "platforms": []}"#),
            Err(OracleFailure::InvalidField { field: "verdict", .. })
        ));
    }

    #[test]
    fn test_non_json_fails() {
        assert!(matches!(parse_report("I cannot help"), Err(OracleFailure::NotJson(_))));
        assert!(matches!(parse_report("{ not json }"), Err(OracleFailure::NotJson(_))));
        assert!(matches!(
            parse_report(r#"{"verdict": 3, "platforms": []}"#),
            Err(OracleFailure::NotJson(_))
        ));
    }

    #[test]
    fn test_quality_priorities_map_to_severity() {
        let raw = r#"{"verdict": "needs-review", "platforms": [
            {"path": "twitter", "violations": [
                {"term": "stunning", "category": "vague-praise", "priority": "recommended"}
            ]}
        ]}"#;
        let report = parse_report(raw).unwrap();
        assert_eq!(report.findings[0].severity, Severity::Soft);
        assert!(report.path_verdicts.is_empty());
    }

    #[test]
    fn test_parse_score() {
        let raw = r#"{"overall": 82.4, "platforms": [
            {"path": "twitter", "score": 90},
            {"path": "linkedin", "score": 140}
        ]}"#;
        let score = parse_score(raw).unwrap();
        assert_eq!(score.overall, 82);
        assert_eq!(score.platforms.len(), 1);

        assert!(matches!(
            parse_score(r#"{"overall": 101}"#),
            Err(OracleFailure::InvalidField { field: "overall", .. })
        ));
        assert!(matches!(
            parse_score(r#"{"platforms": []}"#),
            Err(OracleFailure::MissingField("overall"))
        ));
    }
}
