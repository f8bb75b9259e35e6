//! CLI output formatting utilities.

use crate::progress::{PipelineEvent, ProgressObserver};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Observer that mirrors pipeline events onto a spinner.
    pub fn progress_observer(spinner: ProgressBar) -> ProgressObserver {
        Arc::new(move |event: &PipelineEvent| spinner.set_message(describe(event)))
    }
}

/// One-line description of a pipeline event.
fn describe(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::TranscriptionAttempt {
            attempt,
            max_attempts,
        } => format!("Transcribing (attempt {}/{})...", attempt, max_attempts),
        PipelineEvent::TranscriptionRetry {
            attempt,
            max_attempts,
            error,
            delay,
        } => format!(
            "Attempt {}/{} failed ({}), retrying in {}s...",
            attempt,
            max_attempts,
            content_preview(error, 60),
            delay.as_secs_f32()
        ),
        PipelineEvent::TranscriptionComplete { words, .. } => {
            format!("Transcribed {} words", words)
        }
        PipelineEvent::ChunkSummarized { index, total } => {
            format!("Summarized part {}/{}", index + 1, total)
        }
        PipelineEvent::FinalReduction { chunks } => {
            format!("Combining {} partial summaries...", chunks)
        }
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
