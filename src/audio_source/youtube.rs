//! YouTube source implementation.

use super::{AudioSource, FetchOptions, SourceType};
use crate::audio::download_audio;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;

/// YouTube audio source.
pub struct YoutubeSource {
    video_id_regex: Regex,
}

impl YoutubeSource {
    pub fn new() -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self { video_id_regex }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", video_id)
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioSource for YoutubeSource {
    fn source_type(&self) -> SourceType {
        SourceType::YouTube
    }

    fn can_handle(&self, input: &str) -> bool {
        self.extract_video_id(input).is_some()
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    async fn fetch_audio(&self, input: &str, options: &FetchOptions) -> Result<PathBuf> {
        let video_id = self.extract_video_id(input).ok_or_else(|| {
            RecapError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", input))
        })?;

        download_audio(
            &Self::watch_url(&video_id),
            &video_id,
            &options.output_dir,
            options.timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let source = YoutubeSource::new();

        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=SBnHTvq_ERs"),
            Some("SBnHTvq_ERs".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?list=PL1&v=SBnHTvq_ERs"),
            Some("SBnHTvq_ERs".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/SBnHTvq_ERs"),
            Some("SBnHTvq_ERs".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtube.com/shorts/SBnHTvq_ERs"),
            Some("SBnHTvq_ERs".to_string())
        );
        assert_eq!(
            source.extract_video_id("SBnHTvq_ERs"),
            Some("SBnHTvq_ERs".to_string())
        );

        assert_eq!(source.extract_video_id("not-a-video-id"), None);
        assert_eq!(source.extract_video_id(""), None);
    }

    #[test]
    fn test_can_handle() {
        let source = YoutubeSource::new();

        assert!(source.can_handle("https://www.youtube.com/watch?v=SBnHTvq_ERs"));
        assert!(!source.can_handle("/path/to/lecture.mp3"));
    }

    #[tokio::test]
    async fn test_fetch_reuses_downloaded_audio() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("SBnHTvq_ERs.mp3");
        std::fs::write(&cached, b"audio").unwrap();

        let options = FetchOptions {
            output_dir: dir.path().to_path_buf(),
            timeout: std::time::Duration::from_secs(1),
        };
        let path = YoutubeSource::new()
            .fetch_audio("https://youtu.be/SBnHTvq_ERs", &options)
            .await
            .unwrap();
        assert_eq!(path, cached);
    }
}
