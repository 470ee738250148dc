//! Contextual oracle adapter
//!
//! Wraps an external text-classification service behind
//! [`ContextualOracle`], with bounded retries, strict response validation and
//! needs-review fallbacks. [`Verifier`] runs the full request-scoped
//! pipeline on top of the deterministic compliance engine.

pub mod client;
pub mod config;
pub mod docs;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod prompts;
pub mod retry;

pub use client::{CallShape, ContextualOracle, HttpOracle, OracleRequest};
pub use config::{OracleConfig, RetryPolicy};
pub use docs::ReferenceDocs;
pub use error::{OracleError, OracleFailure};
pub use parse::QualityScore;
pub use pipeline::{PipelineOutput, Verifier};
