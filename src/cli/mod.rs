//! CLI module for Recap.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Recap - long recordings in, short summaries out
///
/// Transcribes lectures and talks (YouTube links or local audio files) and
/// reduces the transcript to a bullet-point summary.
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe and summarize one or more recordings
    Summarize {
        /// YouTube URLs/IDs or local audio file paths
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Directory to write one `<name>.summary.md` per input
        #[arg(short, long)]
        output: Option<String>,

        /// Override the summary language (e.g. "English")
        #[arg(short, long)]
        language: Option<String>,

        /// Also print the per-chunk summaries
        #[arg(long)]
        show_chunks: bool,
    },

    /// Transcribe a recording without summarizing it
    Transcribe {
        /// YouTube URL/ID or local audio file path
        input: String,

        /// Write the transcript to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summarize an existing transcript text file ("-" reads stdin)
    Digest {
        /// Text file to summarize
        file: String,

        /// Override the summary language (e.g. "English")
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summarize_with_many_inputs() {
        let cli = Cli::parse_from([
            "recap",
            "-vv",
            "summarize",
            "https://youtu.be/SBnHTvq_ERs",
            "lecture.m4a",
            "--output",
            "notes",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Summarize { inputs, output, .. } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(output.as_deref(), Some("notes"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_summarize_requires_input() {
        assert!(Cli::try_parse_from(["recap", "summarize"]).is_err());
    }
}
