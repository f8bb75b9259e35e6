//! Fixed-delay retry around a speech-to-text backend.

use super::{AudioClip, SpeechToText, Transcript};
use crate::config::TranscriptionSettings;
use crate::error::{RecapError, Result};
use crate::progress::{notify, PipelineEvent, ProgressObserver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// When and how often a failed attempt is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Constant pause between attempts.
    pub delay: Duration,
    /// Retry non-transient failures (authentication, bad request) too.
    pub retry_all_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
            retry_all_errors: false,
        }
    }
}

impl From<&TranscriptionSettings> for RetryPolicy {
    fn from(settings: &TranscriptionSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1),
            delay: settings.retry_delay(),
            retry_all_errors: settings.retry_all_errors,
        }
    }
}

impl RetryPolicy {
    fn should_retry(&self, error: &RecapError) -> bool {
        self.retry_all_errors || error.is_retryable()
    }
}

/// Turns audio into a transcript, retrying the backend on failure.
pub struct Transcriber {
    backend: Arc<dyn SpeechToText>,
    policy: RetryPolicy,
    observer: Option<ProgressObserver>,
}

impl Transcriber {
    pub fn new(backend: Arc<dyn SpeechToText>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            policy,
            observer: None,
        }
    }

    /// Receive a [`PipelineEvent`] for every attempt.
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Transcribe one clip.
    ///
    /// Makes at most `max_attempts` backend calls, sleeping `delay` between
    /// failures. Fails with [`RecapError::Transcription`] carrying the number
    /// of attempts made and the last cause.
    #[instrument(skip(self, clip), fields(bytes = clip.len()))]
    pub async fn transcribe(&self, clip: &AudioClip) -> Result<Transcript> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            notify(
                &self.observer,
                PipelineEvent::TranscriptionAttempt {
                    attempt,
                    max_attempts,
                },
            );

            let error = match self.backend.recognize(clip).await {
                Ok(text) => {
                    let transcript = Transcript::new(text, attempt);
                    info!(
                        "Transcribed {} words on attempt {}/{}",
                        transcript.word_count(),
                        attempt,
                        max_attempts
                    );
                    notify(
                        &self.observer,
                        PipelineEvent::TranscriptionComplete {
                            attempts: attempt,
                            words: transcript.word_count(),
                        },
                    );
                    return Ok(transcript);
                }
                Err(e) => e,
            };

            if attempt >= max_attempts || !self.policy.should_retry(&error) {
                warn!("Transcription attempt {}/{} failed, giving up: {}", attempt, max_attempts, error);
                return Err(RecapError::Transcription {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            warn!(
                "Transcription attempt {}/{} failed, retrying in {:?}: {}",
                attempt, max_attempts, self.policy.delay, error
            );
            notify(
                &self.observer,
                PipelineEvent::TranscriptionRetry {
                    attempt,
                    max_attempts,
                    error: error.to_string(),
                    delay: self.policy.delay,
                },
            );

            tokio::time::sleep(self.policy.delay).await;
            attempt += 1;
        }
    }
}
