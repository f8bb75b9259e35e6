//! Configuration module for Recap.
//!
//! Handles loading and managing application settings, credentials and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummarizePrompts};
pub use settings::{
    read_secret, Credentials, GeneralSettings, PromptSettings, Settings, SummarizationSettings,
    TranscriptionSettings,
};
