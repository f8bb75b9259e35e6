//! Hugging Face Inference API speech-to-text backend.

use super::{AudioClip, SpeechToText};
use crate::config::TranscriptionSettings;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const BACKEND: &str = "huggingface";

/// Successful inference body.
#[derive(Debug, Deserialize)]
struct InferenceResponse {
    text: String,
}

/// Error body, e.g. `{"error": "Model too busy", "estimated_time": 20.0}`.
#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// Whisper served by the Hugging Face Inference API.
pub struct HuggingFaceWhisper {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HuggingFaceWhisper {
    /// Create a backend for `{endpoint}/{model}` authenticated with `token`.
    pub fn new(endpoint: &str, model: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecapError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), model),
            token: token.to_string(),
        })
    }

    /// Create a backend from settings and a resolved token.
    pub fn from_settings(settings: &TranscriptionSettings, token: &str) -> Result<Self> {
        Self::new(
            &settings.endpoint,
            &settings.model,
            token,
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SpeechToText for HuggingFaceWhisper {
    #[instrument(skip(self, clip), fields(bytes = clip.len(), mime = clip.mime_type))]
    async fn recognize(&self, clip: &AudioClip) -> Result<String> {
        debug!("Posting audio to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, clip.mime_type)
            .body(clip.data.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_inference_body(status, &body)
    }
}

/// Turn a status code and body into transcript text or a typed error.
fn parse_inference_body(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<InferenceError>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(RecapError::SpeechBackend { status, message });
    }

    serde_json::from_str::<InferenceResponse>(body)
        .map(|r| r.text)
        .map_err(|e| RecapError::MalformedResponse {
            backend: BACKEND,
            detail: e.to_string(),
        })
}
