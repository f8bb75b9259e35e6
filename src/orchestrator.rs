//! Pipeline orchestrator for Recap.
//!
//! Coordinates the whole process from audio acquisition to the final summary.

use crate::audio_source::{parse_input, FetchOptions};
use crate::config::{Credentials, Prompts, Settings};
use crate::error::{RecapError, Result};
use crate::progress::ProgressObserver;
use crate::summarization::{HierarchicalSummarizer, OpenAiSummarizer, Summarizer, Summary};
use crate::transcription::{
    AudioClip, HuggingFaceWhisper, RetryPolicy, SpeechToText, Transcriber, Transcript,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The main orchestrator for the Recap pipeline.
pub struct Orchestrator {
    settings: Settings,
    transcriber: Transcriber,
    summarizer: HierarchicalSummarizer,
    fetch_options: FetchOptions,
}

impl Orchestrator {
    /// Create an orchestrator backed by the configured remote services.
    ///
    /// Credentials are read from the environment variables named in settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let credentials = Credentials::from_settings(&settings)?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        info!(
            "Using {} for transcription and {} for summaries ({})",
            settings.transcription.model, settings.summarization.model, settings.summarization.language
        );

        let speech = Arc::new(HuggingFaceWhisper::from_settings(
            &settings.transcription,
            &credentials.speech_token,
        )?);
        let summarizer = Arc::new(OpenAiSummarizer::from_settings(
            &settings.summarization,
            prompts,
            &credentials.openai_api_key,
        )?);

        Self::with_components(settings, speech, summarizer)
    }

    /// Create an orchestrator with custom backends.
    pub fn with_components(
        settings: Settings,
        speech: Arc<dyn SpeechToText>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self> {
        settings.validate()?;

        let transcriber = Transcriber::new(speech, RetryPolicy::from(&settings.transcription));
        let summarizer = HierarchicalSummarizer::from_settings(summarizer, &settings.summarization)?;
        let fetch_options = FetchOptions {
            output_dir: settings.temp_dir(),
            timeout: settings.download_timeout(),
        };

        Ok(Self {
            settings,
            transcriber,
            summarizer,
            fetch_options,
        })
    }

    /// Forward progress events from both stages to `observer`.
    pub fn with_observer(self, observer: ProgressObserver) -> Self {
        Self {
            transcriber: self.transcriber.with_observer(observer.clone()),
            summarizer: self.summarizer.with_observer(observer),
            ..self
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve an input (URL or path) to a local audio file.
    #[instrument(skip(self))]
    pub async fn acquire_audio(&self, input: &str) -> Result<PathBuf> {
        let (source, id) = parse_input(input).ok_or_else(|| {
            RecapError::InvalidInput(format!("Could not parse input: {}", input))
        })?;

        info!("Fetching audio for {} ({})", id, source.source_type());
        source.fetch_audio(input, &self.fetch_options).await
    }

    /// Read an audio file and transcribe it.
    pub async fn transcribe_file(&self, audio_path: &Path) -> Result<Transcript> {
        let clip = AudioClip::from_path(audio_path).await?;
        if clip.is_empty() {
            return Err(RecapError::InvalidInput(format!(
                "Audio file is empty: {}",
                audio_path.display()
            )));
        }
        self.transcriber.transcribe(&clip).await
    }

    /// Summarize text that is already transcribed.
    pub async fn summarize_text(&self, text: &str) -> Result<Summary> {
        self.summarizer.summarize(text).await
    }

    /// Transcribe and summarize one local audio file.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    pub async fn process_file(&self, audio_path: &Path) -> Result<ProcessResult> {
        let transcript = self.transcribe_file(audio_path).await?;
        let summary = self.summarize_text(&transcript.text).await?;

        Ok(ProcessResult {
            audio_path: audio_path.to_path_buf(),
            transcript,
            summary,
        })
    }

    /// Acquire, transcribe and summarize one input.
    pub async fn process_input(&self, input: &str) -> Result<ProcessResult> {
        let audio_path = self.acquire_audio(input).await?;
        self.process_file(&audio_path).await
    }

    /// Process inputs one after another; a failure never stops the batch.
    pub async fn process_batch(&self, inputs: &[String]) -> Vec<SourceOutcome> {
        let mut outcomes = Vec::with_capacity(inputs.len());

        for (i, input) in inputs.iter().enumerate() {
            info!("[{}/{}] Processing {}", i + 1, inputs.len(), input);
            let result = self.process_input(input).await;
            if let Err(e) = &result {
                warn!("Failed to process {}: {}", input, e);
            }
            outcomes.push(SourceOutcome {
                input: input.clone(),
                result,
            });
        }

        outcomes
    }
}

/// Result of processing one audio source.
#[derive(Debug)]
pub struct ProcessResult {
    /// Local audio file that was transcribed.
    pub audio_path: PathBuf,
    /// Transcript of the audio.
    pub transcript: Transcript,
    /// Final summary and its chunk summaries.
    pub summary: Summary,
}

/// Outcome for one input of a batch.
#[derive(Debug)]
pub struct SourceOutcome {
    pub input: String,
    pub result: Result<ProcessResult>,
}

impl SourceOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
