//! Progress events emitted while a recording moves through the pipeline.

use std::sync::Arc;
use std::time::Duration;

/// Something observable happened in the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A speech-to-text request is about to be sent.
    TranscriptionAttempt { attempt: u32, max_attempts: u32 },
    /// An attempt failed and another one follows after `delay`.
    TranscriptionRetry {
        attempt: u32,
        max_attempts: u32,
        error: String,
        delay: Duration,
    },
    /// The transcript arrived.
    TranscriptionComplete { attempts: u32, words: usize },
    /// Chunk `index` (zero-based) of `total` has been summarized.
    ChunkSummarized { index: usize, total: usize },
    /// The chunk summaries are being reduced into the final summary.
    FinalReduction { chunks: usize },
}

/// Callback receiving pipeline events.
pub type ProgressObserver = Arc<dyn Fn(&PipelineEvent) + Send + Sync>;

/// Forward an event to the observer, if any.
pub(crate) fn notify(observer: &Option<ProgressObserver>, event: PipelineEvent) {
    if let Some(observer) = observer {
        observer(&event);
    }
}
