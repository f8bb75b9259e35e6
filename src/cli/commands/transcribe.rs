//! Transcribe command implementation.

use crate::audio_source::{parse_input, FetchOptions};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{read_secret, Settings};
use crate::error::RecapError;
use crate::transcription::{AudioClip, HuggingFaceWhisper, RetryPolicy, Transcriber};
use anyhow::Result;
use std::sync::Arc;

/// Run the transcribe command.
pub async fn run_transcribe(input: &str, output: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcribe, &settings, &[input.to_string()]) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let (source, id) = parse_input(input)
        .ok_or_else(|| RecapError::InvalidInput(format!("Could not parse input: {}", input)))?;
    Output::info(&format!("Processing: {} ({})", id, source.source_type()));

    let token = read_secret(&settings.transcription.token_env)?;
    let backend = HuggingFaceWhisper::from_settings(&settings.transcription, &token)?;

    let spinner = Output::spinner("Fetching audio...");
    let transcriber = Transcriber::new(
        Arc::new(backend),
        RetryPolicy::from(&settings.transcription),
    )
    .with_observer(Output::progress_observer(spinner.clone()));

    let options = FetchOptions {
        output_dir: settings.temp_dir(),
        timeout: settings.download_timeout(),
    };

    let result = async {
        let path = source.fetch_audio(input, &options).await?;
        let clip = AudioClip::from_path(&path).await?;
        if clip.is_empty() {
            return Err(RecapError::InvalidInput(format!(
                "Audio file is empty: {}",
                path.display()
            )));
        }
        transcriber.transcribe(&clip).await
    }
    .await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("Failed to transcribe: {}", e));
            return Err(e.into());
        }
    };

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, &transcript.text)?;
            Output::success(&format!(
                "Wrote {} words to {} (attempt {})",
                transcript.word_count(),
                path.display(),
                transcript.attempts
            ));
        }
        None => println!("{}", transcript.text),
    }

    Ok(())
}
