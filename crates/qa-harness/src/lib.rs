//! QA and regression harness for the compliance rule tables
//!
//! Runs labeled corpora through the deterministic pattern engine, diffs
//! expected against actual findings, reports how well each compliance
//! category is covered, and checks that state-specific rules never fire
//! outside their own jurisdiction.
//!
//! # Example
//!
//! ```no_run
//! use compliance_engine::ComplianceEngine;
//! use qa_harness::{Corpus, OutputFormat, Reporter};
//!
//! # fn example() -> anyhow::Result<()> {
//! let corpus = Corpus::from_file("fixtures/fair_housing.toml")?;
//! let engine = ComplianceEngine::new();
//! let report = qa_harness::run_test_suite(&engine, corpus.name(), &corpus.cases);
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod corpus;
pub mod isolation;
pub mod layers;
pub mod reporter;
pub mod suite;

pub use compare::{compare_findings, Comparison, ExpectedFinding, Mismatch, MismatchKind};
pub use corpus::{Corpus, CorpusError, TestCase};
pub use isolation::{
    rescan_isolation, run_cross_jurisdiction_isolation, run_isolation_matrix, IsolationResult,
    StateLeak,
};
pub use layers::{classify_legal_layer, LegalLayer};
pub use reporter::{OutputFormat, Reporter};
pub use suite::{run_test_suite, CategoryCoverage, SuiteReport, SuiteSummary, TestResult};
