//! Recap - long recordings in, short summaries out
//!
//! Turns a lecture or talk (a YouTube link or a local audio file) into a short
//! bullet-point summary in a chosen language.
//!
//! # Overview
//!
//! The pipeline has two stages:
//! - Transcription: the audio file is sent to a remote speech-to-text model,
//!   retrying transient failures with a fixed delay.
//! - Hierarchical summarization: the transcript is split into word chunks,
//!   each chunk is summarized, and the joined chunk summaries are summarized
//!   once more.
//!
//! # Architecture
//!
//! - `config` - Settings, credentials and prompt templates
//! - `audio_source` - Input abstraction (YouTube, local files)
//! - `audio` - yt-dlp download
//! - `transcription` - Speech-to-text backends and the retrying `Transcriber`
//! - `chunking` - Fixed-size word chunking
//! - `summarization` - Summarization backends and the `HierarchicalSummarizer`
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use recap::config::Settings;
//! use recap::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator.process_input("lecture.mp3").await?;
//!     println!("{}", result.summary.text);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod audio_source;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod progress;
pub mod summarization;
pub mod transcription;

pub use error::{RecapError, Result};
