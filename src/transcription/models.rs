//! Data models for transcription.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw audio content ready to be sent to a speech-to-text backend.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Encoded audio bytes, exactly as read from disk.
    pub data: Vec<u8>,
    /// MIME type sent as the request's content type.
    pub mime_type: &'static str,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, mime_type: &'static str) -> Self {
        Self { data, mime_type }
    }

    /// Read an audio file, inferring the MIME type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(data, mime_type_for(path)))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Map a file extension to the MIME type the inference API expects.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" => "audio/m4a",
        "mp4" => "audio/mp4",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "ogg" | "opus" => "audio/ogg",
        "webm" => "audio/webm",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

/// Transcript produced from one audio clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Text returned by the backend, verbatim.
    pub text: String,
    /// Attempt on which the backend succeeded (1-based).
    pub attempts: u32,
}

impl Transcript {
    pub fn new(text: String, attempts: u32) -> Self {
        Self { text, attempts }
    }

    /// Number of whitespace-delimited words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for_common_extensions() {
        assert_eq!(mime_type_for(Path::new("lecture.mp3")), "audio/mpeg");
        assert_eq!(mime_type_for(Path::new("lecture.M4A")), "audio/m4a");
        assert_eq!(mime_type_for(Path::new("/tmp/a.wav")), "audio/wav");
        assert_eq!(mime_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_clip_from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.ogg");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let clip = AudioClip::from_path(&path).await.unwrap();
        assert_eq!(clip.data, vec![1, 2, 3, 4]);
        assert_eq!(clip.mime_type, "audio/ogg");
        assert_eq!(clip.len(), 4);
    }

    #[test]
    fn test_transcript_word_count() {
        let transcript = Transcript::new("hello  world\nagain".to_string(), 1);
        assert_eq!(transcript.word_count(), 3);
    }
}
