//! Domain-specific error types for proposal-forge

use thiserror::Error;

/// Failure of a single text-completion call.
///
/// Callers recover from every variant the same way (fallback to the
/// deterministic path); the variants only exist to make logs useful.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no AI provider available")]
    Unavailable,

    #[error("provider rejected credentials: {0}")]
    Auth(String),

    #[error("provider rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider returned an empty completion")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = truncate_snippet(body.trim(), 300);
        match status {
            401 | 403 => ProviderError::Auth(body),
            429 => ProviderError::RateLimited(body),
            _ => ProviderError::Http { status, body },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Main error type for the proposal pipeline
#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ProposalError {
    pub fn validation(message: impl Into<String>) -> Self {
        ProposalError::Validation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ProposalError {
    fn from(err: serde_json::Error) -> Self {
        ProposalError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ProposalError {
    fn from(err: toml::de::Error) -> Self {
        ProposalError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for proposal operations
pub type Result<T> = std::result::Result<T, ProposalError>;

fn truncate_snippet(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_string();
    }
    let cut: String = input.chars().take(max).collect();
    format!("{}...", cut)
}
