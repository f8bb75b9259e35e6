//! Audio download utilities.
//!
//! Downloads audio from a URL with yt-dlp and locates the resulting file.

use crate::error::{RecapError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Extensions yt-dlp may leave behind, in order of preference.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "opus", "webm", "ogg", "wav"];

/// Downloads audio from a URL and extracts it as MP3.
///
/// Uses yt-dlp to download and extract audio. If a file for `media_id` already
/// exists in `output_dir`, it is returned without re-downloading. The download
/// is abandoned after `timeout`.
#[instrument(skip(output_dir), fields(media_id = %media_id))]
pub async fn download_audio(
    url: &str,
    media_id: &str,
    output_dir: &Path,
    timeout: Duration,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    if let Some(existing) = find_audio_file(output_dir, media_id) {
        info!("Using cached audio file {}", existing.display());
        return Ok(existing);
    }

    info!("Downloading audio from {}", url);

    let template = output_dir.join(format!("{}.%(ext)s", media_id));

    let child = Command::new("yt-dlp")
        .arg("--extract-audio")
        .arg("--audio-format")
        .arg("mp3")
        .arg("--audio-quality")
        .arg("0")
        .arg("--output")
        .arg(&template)
        .arg("--no-playlist")
        .arg("--quiet")
        .arg("--no-warnings")
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Err(_) => {
            return Err(RecapError::AudioDownload(format!(
                "yt-dlp did not finish within {}s",
                timeout.as_secs()
            )));
        }
        Ok(Ok(o)) => o,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RecapError::ToolNotFound("yt-dlp".into()));
        }
        Ok(Err(e)) => {
            return Err(RecapError::AudioDownload(format!(
                "yt-dlp execution failed: {e}"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RecapError::AudioDownload(format!(
            "yt-dlp failed: {}",
            stderr.trim()
        )));
    }

    let downloaded = find_audio_file(output_dir, media_id).ok_or_else(|| {
        RecapError::AudioDownload("Audio file not found after download".into())
    })?;

    debug!("Downloaded {}", downloaded.display());
    Ok(downloaded)
}

/// Locates a downloaded audio file by media ID.
pub fn find_audio_file(dir: &Path, media_id: &str) -> Option<PathBuf> {
    for ext in AUDIO_EXTENSIONS {
        let candidate = dir.join(format!("{}.{}", media_id, ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    // Fallback: any finished file sharing the ID prefix
    std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            path.is_file()
                && name.starts_with(&format!("{}.", media_id))
                && !name.ends_with(".part")
                && !name.ends_with(".ytdl")
        })
}
