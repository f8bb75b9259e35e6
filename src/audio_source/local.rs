//! Local file source implementation.
//!
//! Accepts audio files and video containers the speech backend can decode.

use super::{AudioSource, FetchOptions, SourceType};
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "opus", "m4a"];

/// Supported video containers (sent as-is, the backend extracts audio).
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];

/// Local file source for audio files.
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }

    fn has_extension(path: &Path, allowed: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| allowed.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Check if path is a supported media file (audio or video).
    fn is_media_file(path: &Path) -> bool {
        Self::has_extension(path, AUDIO_EXTENSIONS) || Self::has_extension(path, VIDEO_EXTENSIONS)
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioSource for LocalSource {
    fn source_type(&self) -> SourceType {
        SourceType::Local
    }

    fn can_handle(&self, input: &str) -> bool {
        let path = Path::new(input);
        path.is_file() || Self::is_media_file(path)
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        self.can_handle(input).then(|| input.to_string())
    }

    async fn fetch_audio(&self, input: &str, _options: &FetchOptions) -> Result<PathBuf> {
        let path = Path::new(input);

        if !path.is_file() {
            return Err(RecapError::InvalidInput(format!("File not found: {}", input)));
        }

        if !Self::is_media_file(path) {
            return Err(RecapError::InvalidInput(format!(
                "Not a recognized audio file: {}",
                input
            )));
        }

        Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn options(dir: &Path) -> FetchOptions {
        FetchOptions {
            output_dir: dir.to_path_buf(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_is_media_file() {
        assert!(LocalSource::is_media_file(Path::new("audio.mp3")));
        assert!(LocalSource::is_media_file(Path::new("audio.M4A")));
        assert!(LocalSource::is_media_file(Path::new("talk.mp4")));
        assert!(!LocalSource::is_media_file(Path::new("document.pdf")));
    }

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lecture.m4a");
        std::fs::write(&file, b"audio").unwrap();

        let path = LocalSource::new()
            .fetch_audio(file.to_str().unwrap(), &options(dir.path()))
            .await
            .unwrap();
        assert_eq!(path, file.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp3");

        let err = LocalSource::new()
            .fetch_audio(missing.to_str().unwrap(), &options(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, RecapError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_fetch_non_audio_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"text").unwrap();

        let err = LocalSource::new()
            .fetch_audio(notes.to_str().unwrap(), &options(dir.path()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not a recognized audio file"));
    }
}
