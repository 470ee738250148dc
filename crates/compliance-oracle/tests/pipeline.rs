//! Pipeline tests against a scripted in-memory oracle

use async_trait::async_trait;
use compliance_engine::ComplianceEngine;
use compliance_oracle::{
    CallShape, ContextualOracle, OracleError, OracleRequest, ReferenceDocs, RetryPolicy, Verifier,
};
use pretty_assertions::assert_eq;
use shared_types::{Campaign, Category, FindingSource, Platform, Severity, Verdict};
use std::sync::Mutex;

/// Answers by prompt kind; `None` simulates a dead connection
#[derive(Default)]
struct ScriptedOracle {
    compliance: Option<String>,
    quality: Option<String>,
    score: Option<String>,
    generation: Option<String>,
    calls: Mutex<Vec<CallShape>>,
}

impl ScriptedOracle {
    fn calls(&self) -> Vec<CallShape> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContextualOracle for ScriptedOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        self.calls.lock().unwrap().push(request.shape);
        let answer = if request.system.contains("compliance reviewer") {
            &self.compliance
        } else if request.system.contains("Score each") {
            &self.score
        } else if request.system.contains("marketing campaigns") {
            &self.generation
        } else {
            &self.quality
        };
        answer
            .clone()
            .ok_or_else(|| OracleError::Transport("connection refused".to_string()))
    }
}

fn verifier(oracle: ScriptedOracle) -> Verifier<ScriptedOracle> {
    Verifier::new(
        oracle,
        ComplianceEngine::new(),
        ReferenceDocs::new("/nonexistent/docs"),
        RetryPolicy::immediate(2),
    )
}

fn tweet(text: &str) -> Campaign {
    Campaign {
        twitter: Some(text.to_string()),
        ..Default::default()
    }
}

const FULL_FIX: &str = r#"{
  "verdict": "non-compliant",
  "platforms": [{
    "path": "twitter",
    "passed": false,
    "violations": [
      {"term": "exclusive neighborhood", "category": "steering", "severity": "hard"},
      {"term": "family-friendly", "category": "familial-status", "severity": "hard"}
    ]
  }],
  "fixes": [
    {"path": "twitter", "before": "exclusive neighborhood", "after": "desirable location"},
    {"path": "twitter", "before": "family-friendly", "after": "welcoming"}
  ]
}"#;

const PARTIAL_FIX: &str = r#"{
  "verdict": "non-compliant",
  "platforms": [{"path": "twitter", "passed": false, "violations": [
    {"term": "exclusive neighborhood", "category": "steering", "severity": "hard"}
  ]}],
  "fixes": [{"path": "twitter", "before": "exclusive neighborhood", "after": "desirable location"}]
}"#;

const CLEAN: &str = r#"{
  "verdict": "compliant",
  "platforms": [{"path": "twitter", "passed": true, "violations": []}],
  "fixes": []
}"#;

const TEXT: &str = "This exclusive neighborhood is family-friendly!";

// ============================================================
// Compliance rewrite
// ============================================================

#[tokio::test]
async fn rewrite_applies_fixes_and_verifies() {
    let verifier = verifier(ScriptedOracle {
        compliance: Some(FULL_FIX.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();
    let document = tweet(TEXT);
    let pre_scan = verifier.engine().scan_one(TEXT, "MT").unwrap();

    let (rewritten, result) = verifier
        .rewrite_for_compliance(&document, &config, &pre_scan)
        .await;

    assert_eq!(
        rewritten.twitter.as_deref(),
        Some("This desirable location is welcoming!")
    );
    assert_eq!(document.twitter.as_deref(), Some(TEXT));
    assert_eq!(result.verdict, Verdict::Compliant);
    assert!(result.rewrite_applied);
    assert_eq!(result.fixes.len(), 2);
}

#[tokio::test]
async fn rewrite_rescan_catches_what_the_oracle_left() {
    let verifier = verifier(ScriptedOracle {
        compliance: Some(PARTIAL_FIX.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let (rewritten, result) = verifier
        .rewrite_for_compliance(&tweet(TEXT), &config, &[])
        .await;

    assert_eq!(
        rewritten.twitter.as_deref(),
        Some("This desirable location is family-friendly!")
    );
    assert_eq!(result.verdict, Verdict::NonCompliant);
    let remaining: Vec<_> = result.findings().collect();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].term, "family-friendly");
    assert_eq!(remaining[0].source, FindingSource::Pattern);
}

#[tokio::test]
async fn rewrite_keeps_contextual_findings_without_a_fix() {
    let answer = r#"{
      "verdict": "non-compliant",
      "platforms": [{"path": "twitter", "passed": false, "violations": [
        {"term": "exclusive neighborhood", "category": "steering", "severity": "hard"},
        {"term": "perfect for a couple without kids", "category": "familial-status", "severity": "hard", "isContextual": true}
      ]}],
      "fixes": [{"path": "twitter", "before": "exclusive neighborhood", "after": "desirable location"}]
    }"#;
    let verifier = verifier(ScriptedOracle {
        compliance: Some(answer.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let (rewritten, result) = verifier
        .rewrite_for_compliance(
            &tweet("This exclusive neighborhood is perfect for a couple without kids."),
            &config,
            &[],
        )
        .await;

    assert_eq!(
        rewritten.twitter.as_deref(),
        Some("This desirable location is perfect for a couple without kids.")
    );
    let remaining: Vec<_> = result.findings().collect();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].term, "perfect for a couple without kids");
    assert!(remaining[0].is_contextual);
    assert!(!result.platforms[0].passed);
    assert_eq!(result.verdict, Verdict::NonCompliant);
}

#[tokio::test]
async fn rewrite_auto_fixes_remaining_soft_findings() {
    let verifier = verifier(ScriptedOracle {
        compliance: Some(CLEAN.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let (rewritten, result) = verifier
        .rewrite_for_compliance(&tweet("Finished basement with a man cave."), &config, &[])
        .await;

    assert_eq!(
        rewritten.twitter.as_deref(),
        Some("Finished basement with a bonus room.")
    );
    let remaining: Vec<_> = result.findings().collect();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].auto_fixed);
    assert_eq!(result.verdict, Verdict::NeedsReview);
}

#[tokio::test]
async fn oracle_outage_falls_back_to_needs_review() {
    let verifier = verifier(ScriptedOracle::default());
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();
    let document = tweet(TEXT);
    let pre_scan = verifier.engine().scan_one(TEXT, "MT").unwrap();

    let (rewritten, result) = verifier
        .rewrite_for_compliance(&document, &config, &pre_scan)
        .await;

    assert_eq!(rewritten, document);
    assert_eq!(result.verdict, Verdict::NeedsReview);
    assert!(!result.rewrite_applied);
    // Transport errors are retried up to the policy limit
    assert_eq!(verifier_calls(&verifier), 2);
}

#[tokio::test]
async fn unparseable_answer_is_not_retried() {
    let verifier = verifier(ScriptedOracle {
        compliance: Some("Sorry, I can't help with that.".to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let (_, result) = verifier
        .rewrite_for_compliance(&tweet("Quiet street"), &config, &[])
        .await;

    assert_eq!(result.verdict, Verdict::NeedsReview);
    assert_eq!(verifier_calls(&verifier), 1);
}

fn verifier_calls(verifier: &Verifier<ScriptedOracle>) -> usize {
    verifier.oracle().calls().len()
}

// ============================================================
// Single text
// ============================================================

#[tokio::test]
async fn check_text_merges_contextual_findings() {
    let answer = r#"{
      "verdict": "non-compliant",
      "platforms": [{"path": "text", "passed": false, "violations": [
        {"term": "perfect for young couples", "category": "familial-status", "severity": "hard", "isContextual": true},
        {"term": "no military", "category": "military-status", "severity": "hard"}
      ]}]
    }"#;
    let verifier = verifier(ScriptedOracle {
        compliance: Some(answer.to_string()),
        ..Default::default()
    });

    assert!(verifier.check_text("anything", "ZZ").await.is_none());

    let result = verifier
        .check_text("Perfect for young couples starting out", "MT")
        .await
        .unwrap();
    let findings: Vec<_> = result.findings().collect();
    // military-status is not a Montana category, so that one is dropped
    assert_eq!(findings.len(), 1);
    assert!(findings[0].is_contextual);
    assert_eq!(findings[0].category, Category::FamilialStatus);
    assert_eq!(result.verdict, Verdict::NonCompliant);
    assert_eq!(verifier.oracle().calls(), vec![CallShape::SingleText]);
}

// ============================================================
// Full pipeline
// ============================================================

#[tokio::test]
async fn run_merges_compliance_and_quality() {
    let quality = r#"{"verdict": "needs-review", "platforms": [{"path": "twitter", "violations": []}], "fixes": []}"#;
    let score = r#"{"overall": 72, "platforms": [{"path": "twitter", "score": 72}]}"#;
    let verifier = verifier(ScriptedOracle {
        compliance: Some(CLEAN.to_string()),
        quality: Some(quality.to_string()),
        score: Some(score.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let output = verifier.run(&tweet("Stunning home!!"), &config).await;

    assert_eq!(output.document.twitter.as_deref(), Some("Striking home!"));
    assert_eq!(output.compliance.verdict, Verdict::Compliant);
    assert_eq!(output.score.as_ref().map(|s| s.overall), Some(72));
    assert!(output.truncated.is_empty());
    // "!!" is a required rule and resolved; "stunning" stays as auto-fixed
    let quality: Vec<_> = output.quality.findings().collect();
    assert_eq!(quality.len(), 1);
    assert_eq!(quality[0].category, Category::VaguePraise);
    assert!(quality[0].auto_fixed);
    assert_eq!(output.quality.verdict, Verdict::NeedsReview);
    assert_eq!(verifier.oracle().calls().len(), 3);
}

#[tokio::test]
async fn run_quality_verdict_matches_the_returned_document() {
    let verifier = verifier(ScriptedOracle {
        compliance: Some(CLEAN.to_string()),
        quality: Some(CLEAN.to_string()),
        score: Some(r#"{"overall": 80}"#.to_string()),
        ..Default::default()
    });
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let output = verifier
        .run(&tweet("Stunning home near the park."), &config)
        .await;

    assert_eq!(
        output.document.twitter.as_deref(),
        Some("Striking home near the park.")
    );
    let flags: Vec<_> = output
        .quality
        .findings()
        .map(|f| (f.term.as_str(), f.severity, f.auto_fixed))
        .collect();
    assert_eq!(flags, vec![("stunning", Severity::Soft, true)]);
    assert_eq!(output.quality.verdict, Verdict::NeedsReview);
    assert!(output.quality.rewrite_applied);
}

#[tokio::test]
async fn quality_check_reports_without_fixing() {
    let verifier = verifier(ScriptedOracle {
        quality: Some(CLEAN.to_string()),
        ..Default::default()
    });

    let result = verifier.quality_check(&tweet("Stunning home near the park.")).await;

    let findings: Vec<_> = result.findings().collect();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].term, "stunning");
    assert!(!findings[0].auto_fixed);
    assert!(!result.rewrite_applied);
    assert_eq!(result.verdict, Verdict::NonCompliant);
}

#[tokio::test]
async fn run_survives_total_outage() {
    let verifier = verifier(ScriptedOracle::default());
    let config = verifier.engine().jurisdiction("MT").unwrap().clone();

    let output = verifier.run(&tweet(TEXT), &config).await;

    assert_eq!(output.document.twitter.as_deref(), Some(TEXT));
    assert_eq!(output.compliance.verdict, Verdict::NeedsReview);
    assert_eq!(output.quality.verdict, Verdict::NeedsReview);
    assert!(output.score.is_none());
    assert!(output.compliance.summary.hard >= 2);
}

// ============================================================
// Generation
// ============================================================

#[tokio::test]
async fn generate_drops_unrequested_platforms() {
    let generated = r##"{"twitter": "Sunny home", "linkedin": "Unrequested", "hashtags": ["#home"]}"##;
    let verifier = verifier(ScriptedOracle {
        generation: Some(generated.to_string()),
        ..Default::default()
    });

    let campaign = verifier
        .generate("3 bed, 2 bath", &[Platform::Twitter])
        .await
        .unwrap();
    assert_eq!(campaign.twitter.as_deref(), Some("Sunny home"));
    assert!(campaign.linkedin.is_none());
    assert_eq!(campaign.hashtags, vec!["#home".to_string()]);
}
