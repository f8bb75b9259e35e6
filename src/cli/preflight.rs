//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and credentials are available
//! before starting operations that would otherwise fail midway.

use crate::audio_source::{detect_source, SourceType};
use crate::config::{read_secret, Settings};
use crate::error::{RecapError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcription needs the speech-to-text token.
    Transcribe,
    /// Summarizing text needs the summarization API key.
    Digest,
    /// The full pipeline needs both.
    Summarize,
}

/// Run pre-flight checks for the given operation and inputs.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings, inputs: &[String]) -> Result<()> {
    settings.validate()?;

    match operation {
        Operation::Transcribe => {
            read_secret(&settings.transcription.token_env)?;
        }
        Operation::Digest => {
            read_secret(&settings.summarization.api_key_env)?;
        }
        Operation::Summarize => {
            read_secret(&settings.transcription.token_env)?;
            read_secret(&settings.summarization.api_key_env)?;
        }
    }

    if needs_downloader(inputs) {
        check_tool("yt-dlp")?;
    }
    Ok(())
}

/// Whether any input is fetched with yt-dlp.
fn needs_downloader(inputs: &[String]) -> bool {
    inputs.iter().any(|input| {
        detect_source(input).is_some_and(|s| s.source_type() == SourceType::YouTube)
    })
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(RecapError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RecapError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(RecapError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
