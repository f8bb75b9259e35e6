//! Audio acquisition helpers.

mod downloader;

pub use downloader::{download_audio, find_audio_file};
