//! Contextual oracle client
//!
//! The oracle is any text-completion service that answers a prompt with a
//! JSON document. [`HttpOracle`] speaks the OpenAI-style chat-completions
//! protocol; tests substitute an in-memory implementation of
//! [`ContextualOracle`].

use crate::config::{OracleConfig, TEMPERATURE};
use crate::error::OracleError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

/// The two independently budgeted request shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Rewrite or review across every field of a campaign
    Document,
    /// One ad-hoc string
    SingleText,
}

/// A single prompt for the oracle
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub shape: CallShape,
    pub system: String,
    pub prompt: String,
}

#[async_trait]
pub trait ContextualOracle: Send + Sync {
    /// Raw text of the oracle's answer
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

/// HTTP oracle client
#[derive(Debug, Clone)]
pub struct HttpOracle {
    config: OracleConfig,
    client: Client,
    api_key: String,
}

impl HttpOracle {
    /// Build a client, reading the API key from the configured variable
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: OracleConfig, api_key: String) -> Result<Self, OracleError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn max_tokens(&self, shape: CallShape) -> u32 {
        match shape {
            CallShape::Document => self.config.document_max_tokens,
            CallShape::SingleText => self.config.single_text_max_tokens,
        }
    }
}

#[async_trait]
impl ContextualOracle for HttpOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens(request.shape),
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(
            endpoint = %self.config.endpoint,
            shape = ?request.shape,
            prompt_len = request.prompt.len(),
            "Sending oracle request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimited);
        }
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| OracleError::InvalidEnvelope(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            info!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "Oracle usage"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = OracleConfig {
            api_key_env: "COPY_CHECK_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpOracle::new(config),
            Err(OracleError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_budgets_follow_call_shape() {
        let config = OracleConfig {
            document_max_tokens: 4000,
            single_text_max_tokens: 300,
            ..Default::default()
        };
        let oracle = HttpOracle::with_api_key(config, "test-key".to_string()).unwrap();
        assert_eq!(oracle.max_tokens(CallShape::Document), 4000);
        assert_eq!(oracle.max_tokens(CallShape::SingleText), 300);
    }

    #[test]
    fn test_request_body_is_deterministic() {
        let body = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: TEMPERATURE,
            max_tokens: 10,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["response_format"]["type"], "json_object");
    }
}
