//! Labeled test corpora
//!
//! A corpus is a TOML file of cases:
//!
//! ```toml
//! name = "Fair housing regression"
//!
//! [[cases]]
//! id = "oh-military"
//! state = "OH"
//! text = "Quiet street, no military please."
//! expected = [{ term = "no military", category = "military-status" }]
//! ```

use crate::compare::ExpectedFinding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Corpus shipped with the crate, one or more cases per supported state
pub const BUILTIN_CORPUS: &str = include_str!("../fixtures/fair_housing.toml");

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed corpus: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate case id: {0}")]
    DuplicateId(String),
    #[error("case {0} has an empty id or text")]
    EmptyCase(String),
}

/// One labeled case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    /// Jurisdiction code or name
    pub state: String,
    pub text: String,
    #[serde(default)]
    pub expected: Vec<ExpectedFinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl Corpus {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus = toml::from_str(s)?;
        corpus.validate()?;
        Ok(corpus)
    }

    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_str(BUILTIN_CORPUS)
    }

    /// Ids must be unique and every case needs text to scan
    pub fn validate(&self) -> Result<(), CorpusError> {
        let mut ids = HashSet::new();
        for case in &self.cases {
            if case.id.trim().is_empty() || case.text.trim().is_empty() {
                return Err(CorpusError::EmptyCase(case.id.clone()));
            }
            if !ids.insert(case.id.as_str()) {
                return Err(CorpusError::DuplicateId(case.id.clone()));
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed corpus")
    }
}
