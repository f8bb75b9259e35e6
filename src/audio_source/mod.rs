//! Audio source abstraction for Recap.
//!
//! Turns user input (a YouTube URL or a local path) into a readable local
//! audio file.

mod local;
mod youtube;

pub use local::LocalSource;
pub use youtube::YoutubeSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Type of media source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    YouTube,
    Local,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::YouTube => write!(f, "youtube"),
            SourceType::Local => write!(f, "local"),
        }
    }
}

/// Where to put downloaded audio and how long to wait for it.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

/// Trait for audio source providers.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Get the source type.
    fn source_type(&self) -> SourceType;

    /// Check if this source can handle the given input.
    fn can_handle(&self, input: &str) -> bool;

    /// Extract a stable ID from input (URL, path, etc.).
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Obtain a readable local audio file for the input.
    async fn fetch_audio(&self, input: &str, options: &FetchOptions) -> Result<PathBuf>;
}

/// Detect the appropriate audio source for the given input.
///
/// An existing file always wins, even if its name looks like a video ID.
pub fn detect_source(input: &str) -> Option<Box<dyn AudioSource>> {
    if Path::new(input).is_file() {
        return Some(Box::new(LocalSource::new()));
    }

    let youtube = YoutubeSource::new();
    if youtube.can_handle(input) {
        return Some(Box::new(youtube));
    }

    let local = LocalSource::new();
    if local.can_handle(input) {
        return Some(Box::new(local));
    }

    None
}

/// Parse input and return the appropriate source and ID.
pub fn parse_input(input: &str) -> Option<(Box<dyn AudioSource>, String)> {
    let source = detect_source(input)?;
    let id = source.extract_id(input)?;
    Some((source, id))
}

/// Short, filesystem-safe name for an input, used for output files.
pub fn display_id(input: &str) -> String {
    match parse_input(input) {
        Some((source, id)) if source.source_type() == SourceType::YouTube => id,
        _ => Path::new(input)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("recording")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_youtube_before_local() {
        let (source, id) = parse_input("https://youtu.be/SBnHTvq_ERs").unwrap();
        assert_eq!(source.source_type(), SourceType::YouTube);
        assert_eq!(id, "SBnHTvq_ERs");
    }

    #[test]
    fn test_detects_local_audio_path() {
        let (source, id) = parse_input("/recordings/lecture-01.m4a").unwrap();
        assert_eq!(source.source_type(), SourceType::Local);
        assert_eq!(id, "/recordings/lecture-01.m4a");
    }

    #[test]
    fn test_existing_file_shadows_video_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SBnHTvq_ERs");
        std::fs::write(&path, b"audio").unwrap();

        let input = path.to_str().unwrap();
        let (source, id) = parse_input(input).unwrap();
        assert_eq!(source.source_type(), SourceType::Local);
        assert_eq!(id, input);

        // Relative to the working directory, the bare name is still a video ID.
        let (source, _) = parse_input("SBnHTvq_ERs").unwrap();
        assert_eq!(source.source_type(), SourceType::YouTube);
    }

    #[test]
    fn test_unknown_input_is_rejected() {
        assert!(parse_input("https://example.com/page").is_none());
    }

    #[test]
    fn test_display_id() {
        assert_eq!(
            display_id("https://www.youtube.com/watch?v=SBnHTvq_ERs"),
            "SBnHTvq_ERs"
        );
        assert_eq!(display_id("/recordings/lecture-01.m4a"), "lecture-01");
    }
}
