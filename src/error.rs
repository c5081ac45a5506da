use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("No response text to parse")]
    MissingText,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// User-facing failure classes. Every [`Error`] collapses into one of these
/// before it reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    EmptyResponse,
    InvalidUpload,
    Internal,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_upload(msg: impl Into<String>) -> Self {
        Self::InvalidUpload(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn empty_response(msg: impl Into<String>) -> Self {
        Self::EmptyResponse(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Api { .. } | Self::Network(_) => FailureKind::Transport,
            Self::EmptyResponse(_) | Self::MissingText => FailureKind::EmptyResponse,
            Self::InvalidUpload(_) => FailureKind::InvalidUpload,
            _ => FailureKind::Internal,
        }
    }

    /// Whether a retry could plausibly succeed: connection problems,
    /// timeouts and server-side (5xx) failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_body(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
