//! Error types for Recap.

use thiserror::Error;

/// Boxed error used to carry an underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Library-level error type for Recap operations.
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    /// Every transcription attempt for one audio clip failed.
    #[error("Transcription failed after {attempts} attempt(s): {source}")]
    Transcription {
        attempts: u32,
        #[source]
        source: Box<RecapError>,
    },

    /// The speech-to-text backend answered with a non-success status.
    #[error("Speech-to-text backend returned HTTP {status}: {message}")]
    SpeechBackend { status: u16, message: String },

    /// The backend answered successfully but the body was unusable.
    #[error("Malformed response from {backend}: {detail}")]
    MalformedResponse { backend: &'static str, detail: String },

    #[error("Summarization failed: {0}")]
    Summarization(#[from] SummarizationError),

    /// A single chunk failed during hierarchical summarization.
    #[error("Summarizing chunk {} of {total} failed: {source}", .index + 1)]
    ChunkFailure {
        index: usize,
        total: usize,
        #[source]
        source: Box<RecapError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures of the summarization stage.
#[derive(Error, Debug)]
pub enum SummarizationError {
    #[error("input text is empty, nothing to summarize")]
    EmptyInput,

    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("backend returned no content")]
    EmptyResponse,
}

impl SummarizationError {
    /// Wrap a backend failure with context.
    pub fn request(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Request {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl RecapError {
    /// Whether a failed speech-to-text attempt is worth repeating.
    ///
    /// Transport errors, timeouts, rate limiting, server-side errors and
    /// malformed bodies are transient. Authentication and request errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            RecapError::Http(_) => true,
            RecapError::MalformedResponse { .. } => true,
            RecapError::SpeechBackend { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// Index of the chunk that failed, if this is a chunk failure.
    pub fn failed_chunk(&self) -> Option<usize> {
        match self {
            RecapError::ChunkFailure { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type alias for Recap operations.
pub type Result<T> = std::result::Result<T, RecapError>;
