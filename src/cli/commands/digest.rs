//! Digest command - summarize a transcript that already exists as text.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{read_secret, Prompts, Settings};
use crate::summarization::{HierarchicalSummarizer, OpenAiSummarizer};
use anyhow::{Context, Result};
use std::io::Read;
use std::sync::Arc;

/// Run the digest command.
pub async fn run_digest(file: &str, language: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(language) = language {
        settings.summarization.language = language;
    }

    if let Err(e) = preflight::check(Operation::Digest, &settings, &[]) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let text = read_text(file)?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let api_key = read_secret(&settings.summarization.api_key_env)?;
    let backend = OpenAiSummarizer::from_settings(&settings.summarization, prompts, &api_key)?;

    let spinner = Output::spinner("Summarizing...");
    let summarizer = HierarchicalSummarizer::from_settings(Arc::new(backend), &settings.summarization)?
        .with_observer(Output::progress_observer(spinner.clone()));

    let result = summarizer.summarize(&text).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            Output::kv("Parts", &summary.chunk_count().to_string());
            println!("\n{}", summary.text);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to summarize: {}", e));
            Err(e.into())
        }
    }
}

/// Read the whole file, or stdin when `file` is "-".
fn read_text(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    let path = Settings::expand_path(file);
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        std::fs::write(&path, "שלום עולם").unwrap();

        let text = read_text(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "שלום עולם");
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text("/nonexistent/recap/transcript.txt").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
