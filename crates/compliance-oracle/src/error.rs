use thiserror::Error;

/// Failure talking to the oracle
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("unexpected response envelope: {0}")]
    InvalidEnvelope(String),
}

impl OracleError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            OracleError::Transport(_) | OracleError::Timeout | OracleError::RateLimited => true,
            OracleError::Status { status, .. } => *status >= 500,
            OracleError::MissingApiKey(_)
            | OracleError::EmptyResponse
            | OracleError::InvalidEnvelope(_) => false,
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            OracleError::Timeout
        } else {
            OracleError::Transport(e.to_string())
        }
    }
}

/// Why an oracle answer could not be used
///
/// Any of these sends the caller to the fallback result.
#[derive(Debug, Error)]
pub enum OracleFailure {
    #[error("oracle call failed: {0}")]
    Call(#[from] OracleError),

    #[error("response is not JSON: {0}")]
    NotJson(String),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("failed to build prompt: {0}")]
    Prompt(#[from] std::fmt::Error),
}
