//! Summarization module for Recap.
//!
//! Reduces arbitrarily long text to a short summary by summarizing bounded
//! word chunks one by one, then summarizing the joined chunk summaries.

mod hierarchical;
mod openai;

pub use hierarchical::{HierarchicalSummarizer, Summary};
pub use openai::OpenAiSummarizer;

use crate::error::Result;
use async_trait::async_trait;

/// A single summarization request.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` in one backend call, without retry.
    async fn summarize_one(&self, text: &str) -> Result<String>;
}
