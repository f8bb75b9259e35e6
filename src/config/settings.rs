//! Configuration settings for Recap.

use crate::error::{RecapError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub summarization: SummarizationSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where downloaded audio is placed.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Give up on an audio download after this many seconds.
    pub download_timeout_seconds: u64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/recap".to_string(),
            log_level: "info".to_string(),
            download_timeout_seconds: 600,
        }
    }
}

/// Speech-to-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Base URL of the inference API; the model name is appended.
    pub endpoint: String,
    /// Speech-to-text model identifier.
    pub model: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
    /// Maximum number of attempts per audio clip.
    pub max_retries: u32,
    /// Fixed delay between failed attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// Retry authentication and request errors too, not only transient ones.
    pub retry_all_errors: bool,
    /// HTTP timeout for a single attempt.
    pub timeout_seconds: u64,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            model: "openai/whisper-large-v3".to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            max_retries: 3,
            retry_delay_ms: 5000,
            retry_all_errors: false,
            timeout_seconds: 300,
        }
    }
}

impl TranscriptionSettings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Chat model used for every summarization call.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Alternative OpenAI-compatible base URL. Empty means the OpenAI default.
    pub api_base: String,
    /// Language the summary is written in.
    pub language: String,
    /// Maximum number of words per chunk.
    pub chunk_size: usize,
    /// Maximum output tokens per call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Return the chunk summary directly when the text fits in one chunk.
    pub collapse_single_chunk: bool,
    /// HTTP timeout for a single call.
    pub timeout_seconds: u64,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_base: String::new(),
            language: "Hebrew".to_string(),
            chunk_size: crate::chunking::DEFAULT_CHUNK_WORDS,
            max_tokens: 500,
            temperature: 0.5,
            collapse_single_chunk: false,
            timeout_seconds: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

/// API credentials resolved from the environment at startup.
#[derive(Clone)]
pub struct Credentials {
    pub speech_token: String,
    pub openai_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("speech_token", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read both credentials from the environment variables named in settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            speech_token: read_secret(&settings.transcription.token_env)?,
            openai_api_key: read_secret(&settings.summarization.api_key_env)?,
        })
    }
}

/// Read a non-empty secret from an environment variable.
pub fn read_secret(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(RecapError::Config(format!(
            "{var} is empty. Set it with: export {var}='...'"
        ))),
        Err(_) => Err(RecapError::Config(format!(
            "{var} not set. Set it with: export {var}='...'"
        ))),
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Only parses the file. Call [`Settings::validate`] before running the
    /// pipeline.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        Ok(settings)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.summarization.chunk_size == 0 {
            return Err(RecapError::Config(
                "summarization.chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.transcription.max_retries == 0 {
            return Err(RecapError::Config(
                "transcription.max_retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.summarization.temperature) {
            return Err(RecapError::Config(format!(
                "summarization.temperature must be between 0 and 2, got {}",
                self.summarization.temperature
            )));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| RecapError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recap")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.general.download_timeout_seconds)
    }
}
