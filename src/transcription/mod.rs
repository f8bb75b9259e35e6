//! Transcription module for Recap.
//!
//! Sends raw audio to a remote speech-to-text backend and retries transient
//! failures with a fixed delay.
//!
//! # Components
//!
//! - [`SpeechToText`]: the backend seam, one request per call.
//! - [`HuggingFaceWhisper`]: Whisper via the Hugging Face Inference API.
//! - [`Transcriber`]: bounded fixed-delay retry around any backend.

mod huggingface;
mod models;
mod transcriber;

pub use huggingface::HuggingFaceWhisper;
pub use models::{mime_type_for, AudioClip, Transcript};
pub use transcriber::{RetryPolicy, Transcriber};

use crate::error::Result;
use async_trait::async_trait;

/// A single speech-to-text request.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Convert audio into text. One remote call, no retry.
    async fn recognize(&self, clip: &AudioClip) -> Result<String>;
}
