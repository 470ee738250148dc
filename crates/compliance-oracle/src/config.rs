//! Oracle configuration
//!
//! Loaded from TOML. Every field has a default so an empty file is a valid
//! configuration; only the API key has to come from the environment.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sampling temperature for every oracle call
///
/// Compliance decisions must be reproducible, so this is not configurable.
pub const TEMPERATURE: f32 = 0.0;

/// Contextual oracle connection and budget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Chat-completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Per-request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Output budget for calls covering a whole campaign
    #[serde(default = "default_document_max_tokens")]
    pub document_max_tokens: u32,
    /// Output budget for calls covering one ad-hoc string
    #[serde(default = "default_single_text_max_tokens")]
    pub single_text_max_tokens: u32,
    /// Root directory for jurisdiction reference documents
    #[serde(default = "default_docs_root")]
    pub docs_root: PathBuf,
}

impl OracleConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read oracle config: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse oracle TOML configuration")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
            document_max_tokens: default_document_max_tokens(),
            single_text_max_tokens: default_single_text_max_tokens(),
            docs_root: default_docs_root(),
        }
    }
}

/// Bounded exponential backoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry (default: 500ms)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound on any single delay (default: 8000ms)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base * 2^(retry-1), capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        let delay = self.base_delay_ms.saturating_mul(1u64 << exponent);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// A policy with no delays, for tests and offline runs
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "ORACLE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_document_max_tokens() -> u32 {
    8192
}

fn default_single_text_max_tokens() -> u32 {
    1024
}

fn default_docs_root() -> PathBuf {
    PathBuf::from("docs")
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8000
}
