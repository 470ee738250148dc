// Prompt assembly for the contextual oracle
use crate::client::{CallShape, OracleRequest};
use crate::error::OracleFailure;
use compliance_engine::quality::QualityRules;
use compliance_engine::terms::Term;
use compliance_engine::JurisdictionConfig;
use shared_types::{Category, ExtractedText, Finding, Platform, Severity, STRATEGY_KEYS};
use std::fmt::{self, Write};

const REPORT_FORMAT: &str = r#"Respond with JSON only, in exactly this shape:
{
  "verdict": "compliant" | "needs-review" | "non-compliant",
  "platforms": [
    {
      "path": "<path exactly as given>",
      "passed": true | false,
      "violations": [
        {
          "term": "<offending words as written>",
          "category": "<one of the listed categories>",
          "severity": "hard" | "soft",
          "explanation": "<why>",
          "legalCitation": "<statute or rule>",
          "suggestedAlternative": "<replacement>",
          "isContextual": true | false
        }
      ]
    }
  ],
  "fixes": [
    { "path": "<path>", "before": "<exact original substring>", "after": "<replacement>", "term": "<term>", "category": "<category>" }
  ]
}"#;

const SCORE_FORMAT: &str = r#"Respond with JSON only, in exactly this shape:
{ "overall": <0-100>, "platforms": [ { "path": "<path>", "score": <0-100> } ] }"#;

fn term_line(term: &Term) -> String {
    format!(
        "- \"{}\" [{}, {}]: {} ({}) -> \"{}\"",
        term.term,
        term.category,
        match term.severity {
            Severity::Hard => "hard",
            Severity::Soft => "soft",
        },
        term.explanation,
        term.legal_citation,
        term.suggested_alternative
    )
}

/// Registry section: categories, then one line per term
pub fn terms_section(config: &JurisdictionConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "JURISDICTION: {} ({}), MLS: {}",
        config.state.name(),
        config.state,
        config.mls_name
    )?;
    let categories: Vec<String> = config.categories().iter().map(Category::to_string).collect();
    writeln!(out, "CATEGORIES: {}", categories.join(", "))?;
    writeln!(out, "PROHIBITED TERMS:")?;
    for term in &config.terms {
        writeln!(out, "{}", term_line(term))?;
    }
    writeln!(
        out,
        "REQUIRED DISCLOSURES: {}",
        config.required_disclosures.join("; ")
    )?;
    Ok(out)
}

/// Quality section: categories with priorities
pub fn quality_section(rules: &QualityRules) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let categories: Vec<String> = rules.categories().iter().map(Category::to_string).collect();
    writeln!(out, "CATEGORIES: {}", categories.join(", "))?;
    writeln!(out, "ANTI-PATTERNS (hard = required, soft = recommended):")?;
    for term in &rules.terms {
        writeln!(out, "{}", term_line(term))?;
    }
    Ok(out)
}

/// One line per leaf: `path: "json-escaped text"`
pub fn texts_section(texts: &[ExtractedText]) -> String {
    texts
        .iter()
        .map(|t| {
            let quoted = serde_json::to_string(&t.text).unwrap_or_default();
            format!("{}: {}", t.path, quoted)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pre_scan_section(findings: &[Finding]) -> Result<String, fmt::Error> {
    if findings.is_empty() {
        return Ok("PRE-SCAN: no deterministic matches.".to_string());
    }
    let mut out = String::from("PRE-SCAN (deterministic matches, confirm and fix each):\n");
    for f in findings {
        writeln!(out, "- {}: \"{}\" [{}]", f.path, f.term, f.category)?;
    }
    Ok(out)
}

fn reference_section(reference: &str) -> String {
    if reference.trim().is_empty() {
        String::new()
    } else {
        format!("\nREFERENCE:\n{}\n", reference)
    }
}

/// Whole-campaign compliance review and rewrite
pub fn compliance_rewrite(
    config: &JurisdictionConfig,
    texts: &[ExtractedText],
    pre_scan: &[Finding],
    reference: &str,
) -> Result<OracleRequest, OracleFailure> {
    let system = format!(
        "You are a fair housing compliance reviewer for real estate advertising. \
         Find every violation, including ones only a careful reader would catch, \
         and propose minimal fixes that keep the copy's meaning.\n\n{}{}\n{}",
        terms_section(config)?,
        reference_section(reference),
        REPORT_FORMAT
    );
    let prompt = format!(
        "{}\n\nCOPY:\n{}",
        pre_scan_section(pre_scan)?,
        texts_section(texts)
    );
    Ok(OracleRequest {
        shape: CallShape::Document,
        system,
        prompt,
    })
}

/// Compliance check of one ad-hoc string, reported at `path`
pub fn compliance_single(
    config: &JurisdictionConfig,
    text: &ExtractedText,
    reference: &str,
) -> Result<OracleRequest, OracleFailure> {
    let system = format!(
        "You are a fair housing compliance reviewer for real estate advertising.\n\n{}{}\n{}",
        terms_section(config)?,
        reference_section(reference),
        REPORT_FORMAT
    );
    Ok(OracleRequest {
        shape: CallShape::SingleText,
        system,
        prompt: format!("COPY:\n{}", texts_section(std::slice::from_ref(text))),
    })
}

/// Copy quality review with fixes
pub fn quality_check(
    rules: &QualityRules,
    texts: &[ExtractedText],
) -> Result<OracleRequest, OracleFailure> {
    let system = format!(
        "You are a senior real estate copy editor. Flag weak copy and propose fixes.\n\n{}\n{}",
        quality_section(rules)?,
        REPORT_FORMAT
    );
    Ok(OracleRequest {
        shape: CallShape::Document,
        system,
        prompt: format!("COPY:\n{}", texts_section(texts)),
    })
}

/// Copy quality score
pub fn quality_score(texts: &[ExtractedText]) -> Result<OracleRequest, OracleFailure> {
    let system = format!(
        "You are a senior real estate copy editor. Score each piece of copy \
         for clarity, specificity and persuasiveness.\n\n{}",
        SCORE_FORMAT
    );
    Ok(OracleRequest {
        shape: CallShape::Document,
        system,
        prompt: format!("COPY:\n{}", texts_section(texts)),
    })
}

/// Campaign generation for the requested platforms
pub fn generation(listing: &str, requested: &[Platform]) -> Result<OracleRequest, OracleFailure> {
    let keys: Vec<&str> = requested.iter().map(Platform::key).collect();
    let system = format!(
        "You write real estate marketing campaigns. Respond with one JSON object \
         whose keys are exactly: {}, {}. Never describe the buyer, only the property.",
        keys.join(", "),
        STRATEGY_KEYS.join(", ")
    );
    Ok(OracleRequest {
        shape: CallShape::Document,
        system,
        prompt: format!("LISTING:\n{}", listing),
    })
}
