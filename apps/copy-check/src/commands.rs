//! Subcommand implementations
//!
//! Each command returns its stdout text and whether the checked copy (or
//! corpus) passed; `main` turns that into the exit code.

use crate::input::{read_campaign, read_input};
use anyhow::{anyhow, Context, Result};
use compliance_engine::autofix::auto_fix_document;
use compliance_engine::constraints::enforce_constraints;
use compliance_engine::{ComplianceEngine, ComplianceResult, JurisdictionConfig, State};
use compliance_oracle::{HttpOracle, OracleConfig, ReferenceDocs, Verifier};
use qa_harness::{
    rescan_isolation, run_isolation_matrix, run_test_suite, Corpus, OutputFormat, Reporter,
};
use serde::Serialize;
use shared_types::{Campaign, FieldPath, Platform, Verdict};
use std::path::PathBuf;
use tracing::info;

pub struct Outcome {
    pub output: String,
    pub passed: bool,
}

impl Outcome {
    fn json<T: Serialize>(value: &T, passed: bool) -> Result<Self> {
        Ok(Self {
            output: serde_json::to_string_pretty(value)?,
            passed,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixOutput {
    document: Campaign,
    truncated: Vec<FieldPath>,
    before: ComplianceResult,
    after: ComplianceResult,
}

fn jurisdiction<'a>(engine: &'a ComplianceEngine, state: &str) -> Result<&'a JurisdictionConfig> {
    engine
        .jurisdiction(state)
        .ok_or_else(|| anyhow!("Unsupported jurisdiction: {}", state))
}

fn parse_state(code: &str) -> Result<State> {
    State::parse_code(code).ok_or_else(|| anyhow!("Unknown state: {}", code))
}

fn load_corpus(path: Option<PathBuf>) -> Result<Corpus> {
    match path {
        Some(path) => Corpus::from_file(&path)
            .with_context(|| format!("Failed to load corpus {}", path.display())),
        None => Corpus::builtin().context("Bundled corpus is invalid"),
    }
}

fn verifier(config: Option<PathBuf>) -> Result<Verifier<HttpOracle>> {
    let config = match config {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::default(),
    };
    let docs = ReferenceDocs::new(config.docs_root.clone());
    let retry = config.retry.clone();
    let oracle = HttpOracle::new(config).context("Cannot create oracle client")?;
    Ok(Verifier::new(oracle, ComplianceEngine::new(), docs, retry))
}

pub fn scan(
    state: &str,
    file: Option<PathBuf>,
    text: Option<String>,
    quality: bool,
) -> Result<Outcome> {
    let engine = ComplianceEngine::new();
    let config = jurisdiction(&engine, state)?;

    if let Some(text) = text {
        let findings = if quality {
            engine.check_text(&text, state)
        } else {
            engine.scan_one(&text, state)
        }
        .unwrap_or_default();
        let passed = findings.is_empty();
        return Outcome::json(&findings, passed);
    }

    let document = read_campaign(file.as_deref())?;
    let result = engine.scan_document(&document, config);
    if quality {
        let quality_result = engine.scan_quality(&document);
        let passed = result.passed() && quality_result.passed();
        return Outcome::json(
            &serde_json::json!({ "compliance": result, "quality": quality_result }),
            passed,
        );
    }
    let passed = result.passed();
    Outcome::json(&result, passed)
}

/// Constraints, deterministic scan, auto-fix, then a verifying re-scan
pub fn fix(state: &str, file: Option<PathBuf>) -> Result<Outcome> {
    let engine = ComplianceEngine::new();
    let config = jurisdiction(&engine, state)?;
    let document = read_campaign(file.as_deref())?;

    let (constrained, truncated) = enforce_constraints(&document, config);
    let before = engine.scan_document(&constrained, config);
    let fixed = auto_fix_document(&constrained, &before);
    let after = engine.scan_document(&fixed, config);
    info!(
        before = before.summary.total,
        after = after.summary.total,
        "Auto-fix finished"
    );

    let passed = after.verdict == Verdict::Compliant;
    Outcome::json(
        &FixOutput {
            document: fixed,
            truncated,
            before,
            after,
        },
        passed,
    )
}

pub async fn rewrite(state: &str, file: Option<PathBuf>, config: Option<PathBuf>) -> Result<Outcome> {
    let verifier = verifier(config)?;
    let rules = jurisdiction(verifier.engine(), state)?;
    let document = read_campaign(file.as_deref())?;

    let output = verifier.run(&document, rules).await;
    let passed = output.compliance.verdict == Verdict::Compliant;
    Outcome::json(&output, passed)
}

pub async fn check(state: &str, text: &str, config: Option<PathBuf>) -> Result<Outcome> {
    let verifier = verifier(config)?;
    let result = verifier
        .check_text(text, state)
        .await
        .ok_or_else(|| anyhow!("Unsupported jurisdiction: {}", state))?;
    let passed = result.verdict == Verdict::Compliant;
    Outcome::json(&result, passed)
}

pub async fn generate(
    file: Option<PathBuf>,
    platforms: &[String],
    config: Option<PathBuf>,
) -> Result<Outcome> {
    let requested = platforms
        .iter()
        .map(|key| {
            Platform::from_key(key.trim()).ok_or_else(|| anyhow!("Unknown platform: {}", key))
        })
        .collect::<Result<Vec<_>>>()?;
    let listing = read_input(file.as_deref())?;

    let verifier = verifier(config)?;
    let campaign = verifier
        .generate(&listing, &requested)
        .await
        .context("Campaign generation failed")?;
    Outcome::json(&campaign, true)
}

pub fn qa(corpus: Option<PathBuf>, format: OutputFormat, output: Option<PathBuf>) -> Result<Outcome> {
    let corpus = load_corpus(corpus)?;
    let report = run_test_suite(&ComplianceEngine::new(), corpus.name(), &corpus.cases);
    let reporter = Reporter::new(format);

    if let Some(path) = output {
        reporter
            .write_to_file(&report, &path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(Outcome {
        output: reporter.format_suite(&report)?,
        passed: report.passed(),
    })
}

pub fn isolate(
    corpus: Option<PathBuf>,
    text: Option<String>,
    from: Option<String>,
    to: Option<String>,
    format: OutputFormat,
) -> Result<Outcome> {
    let engine = ComplianceEngine::new();

    let results = match (text, from, to) {
        (Some(text), Some(from), Some(to)) => {
            let source = parse_state(&from)?;
            let tested = parse_state(&to)?;
            let result = rescan_isolation(&engine, &text, source, tested)
                .ok_or_else(|| anyhow!("Unsupported jurisdiction: {}", to))?;
            vec![result]
        }
        (Some(_), _, _) => return Err(anyhow!("--text needs both --from and --to")),
        _ => run_isolation_matrix(&engine, &load_corpus(corpus)?.cases),
    };

    Ok(Outcome {
        output: Reporter::new(format).format_isolation(&results)?,
        passed: results.iter().all(|r| r.passed),
    })
}
