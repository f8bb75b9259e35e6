//! Summarize command implementation.

use crate::audio_source::display_id;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Orchestrator, ProcessResult};
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Run the summarize command.
pub async fn run_summarize(
    inputs: &[String],
    output: Option<String>,
    language: Option<String>,
    show_chunks: bool,
    mut settings: Settings,
) -> Result<()> {
    if let Some(language) = language {
        settings.summarization.language = language;
    }

    if let Err(e) = preflight::check(Operation::Summarize, &settings, inputs) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let output_dir = output.map(|o| Settings::expand_path(&o));
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let total = inputs.len();
    Output::info(&format!("Processing {} recording(s)", total));

    let spinner = Output::spinner("Starting...");
    let orchestrator =
        Orchestrator::new(settings)?.with_observer(Output::progress_observer(spinner.clone()));
    let outcomes = orchestrator.process_batch(inputs).await;
    spinner.finish_and_clear();

    let mut failed = 0;
    let mut used_names = HashSet::new();
    for (i, outcome) in outcomes.iter().enumerate() {
        Output::header(&format!("[{}/{}] {}", i + 1, total, outcome.input));

        match &outcome.result {
            Ok(result) => {
                print_result(result, show_chunks);
                if let Some(dir) = &output_dir {
                    let name = unique_name(display_id(&outcome.input), &mut used_names);
                    let path = write_summary(dir, &name, &outcome.input, result)?;
                    Output::success(&format!("Saved to {}", path.display()));
                }
            }
            Err(e) => {
                Output::error(&format!("Failed: {}", e));
                failed += 1;
            }
        }
    }

    println!();
    Output::info(&format!(
        "Done: {} summarized, {} failed",
        total - failed,
        failed
    ));

    if failed > 0 {
        return Err(anyhow::anyhow!("{} of {} inputs failed", failed, total));
    }
    Ok(())
}

fn print_result(result: &ProcessResult, show_chunks: bool) {
    Output::kv("Transcript", &format!("{} words", result.transcript.word_count()));
    Output::kv("Parts", &result.summary.chunk_count().to_string());

    if show_chunks {
        for (i, chunk_summary) in result.summary.chunk_summaries.iter().enumerate() {
            Output::list_item(&format!("Part {}:\n{}", i + 1, chunk_summary));
        }
    }

    println!("\n{}", result.summary.text);
}

/// Make `base` distinct from every name already handed out in this batch.
fn unique_name(base: String, used: &mut HashSet<String>) -> String {
    let mut name = base.clone();
    let mut n = 2;
    while !used.insert(name.clone()) {
        name = format!("{}-{}", base, n);
        n += 1;
    }
    name
}

/// Write `<name>.summary.md` into `dir`.
fn write_summary(dir: &Path, name: &str, input: &str, result: &ProcessResult) -> Result<PathBuf> {
    let path = dir.join(format!("{}.summary.md", name));
    std::fs::write(&path, render_markdown(input, result))?;
    Ok(path)
}

fn render_markdown(input: &str, result: &ProcessResult) -> String {
    let mut doc = format!("# Summary\n\nSource: {}\n\n{}\n", input, result.summary.text);

    if result.summary.chunk_count() > 1 {
        doc.push_str("\n## Parts\n");
        for (i, chunk_summary) in result.summary.chunk_summaries.iter().enumerate() {
            doc.push_str(&format!("\n### Part {}\n\n{}\n", i + 1, chunk_summary));
        }
    }

    doc
}
