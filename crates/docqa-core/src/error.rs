//! Error taxonomy shared by every docqa crate.
//!
//! Startup failures are fatal. Embedding and generation failures are fatal
//! while the index is being built and recoverable once the session is
//! running; the session decides which one applies.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("startup failed: {0}")]
    Startup(#[from] StartupError),

    #[error("corpus is empty: no document yielded any text")]
    EmptyCorpus,

    #[error("embedding provider error: {0}")]
    Embedding(#[from] EmbedError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerateError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("document directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("no recognized documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error("required setting '{0}' is missing")]
    MissingSetting(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to extract text from {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("expected {expected} embeddings, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Errors that may succeed when the same call is repeated.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

fn status_is_transient(status: u16) -> bool {
    status == 408 || status == 429 || (500..600).contains(&status)
}

const ERROR_BODY_LIMIT: usize = 200;

/// Trimmed provider error body, cut to a loggable length.
pub fn summarize_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

impl Transient for EmbedError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => status_is_transient(*status),
            Self::Malformed(_) | Self::CountMismatch { .. } | Self::DimensionMismatch { .. } => false,
        }
    }
}

impl Transient for GenerateError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => status_is_transient(*status),
            Self::Malformed(_) => false,
        }
    }
}
