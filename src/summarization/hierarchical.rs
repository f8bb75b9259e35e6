//! Hierarchical reduce: summarize chunks, then summarize the summaries.

use super::Summarizer;
use crate::chunking::WordChunker;
use crate::config::SummarizationSettings;
use crate::error::{RecapError, Result, SummarizationError};
use crate::progress::{notify, PipelineEvent, ProgressObserver};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Final output of a hierarchical summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The final summary text.
    pub text: String,
    /// Per-chunk summaries in chunk order.
    pub chunk_summaries: Vec<String>,
}

impl Summary {
    pub fn chunk_count(&self) -> usize {
        self.chunk_summaries.len()
    }
}

/// Summarizes long text in two levels over a single-call backend.
pub struct HierarchicalSummarizer {
    backend: Arc<dyn Summarizer>,
    chunker: WordChunker,
    collapse_single_chunk: bool,
    observer: Option<ProgressObserver>,
}

impl HierarchicalSummarizer {
    pub fn new(backend: Arc<dyn Summarizer>, chunker: WordChunker) -> Self {
        Self {
            backend,
            chunker,
            collapse_single_chunk: false,
            observer: None,
        }
    }

    /// Build from settings; validates the chunk size.
    pub fn from_settings(
        backend: Arc<dyn Summarizer>,
        settings: &SummarizationSettings,
    ) -> Result<Self> {
        Ok(Self::new(backend, WordChunker::new(settings.chunk_size)?)
            .collapse_single_chunk(settings.collapse_single_chunk))
    }

    /// Return the lone chunk summary as-is instead of summarizing it again.
    pub fn collapse_single_chunk(mut self, enabled: bool) -> Self {
        self.collapse_single_chunk = enabled;
        self
    }

    /// Receive a [`PipelineEvent`] per chunk and for the final reduction.
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Summarize `text`.
    ///
    /// Chunks are summarized sequentially in order; the first failure aborts
    /// with [`RecapError::ChunkFailure`]. Empty text fails with
    /// [`SummarizationError::EmptyInput`] before any backend call.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<Summary> {
        let chunks = self.chunker.split(text);
        if chunks.is_empty() {
            return Err(SummarizationError::EmptyInput.into());
        }

        let total = chunks.len();
        info!(
            "Summarizing {} chunk(s) of up to {} words",
            total,
            self.chunker.max_words()
        );

        let mut chunk_summaries = Vec::with_capacity(total);
        for chunk in &chunks {
            debug!("Summarizing chunk {}/{} ({} words)", chunk.index + 1, total, chunk.word_count);

            let summary = self
                .backend
                .summarize_one(&chunk.text)
                .await
                .map_err(|e| RecapError::ChunkFailure {
                    index: chunk.index,
                    total,
                    source: Box::new(e),
                })?;

            chunk_summaries.push(summary);
            notify(
                &self.observer,
                PipelineEvent::ChunkSummarized {
                    index: chunk.index,
                    total,
                },
            );
        }

        if total == 1 && self.collapse_single_chunk {
            debug!("Single chunk, returning its summary directly");
            return Ok(Summary {
                text: chunk_summaries[0].clone(),
                chunk_summaries,
            });
        }

        notify(&self.observer, PipelineEvent::FinalReduction { chunks: total });
        let joined = chunk_summaries.join(" ");
        let text = self
            .backend
            .summarize_one(&joined)
            .await
            .map_err(into_summarization_error)?;

        info!("Final summary ready ({} chunks reduced)", total);
        Ok(Summary {
            text,
            chunk_summaries,
        })
    }
}

/// Keep summarization errors as they are; wrap anything else.
fn into_summarization_error(error: RecapError) -> RecapError {
    match error {
        RecapError::Summarization(_) => error,
        other => SummarizationError::request("final reduction failed", other).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every input and answers `sum(<word count>)`.
    #[derive(Default)]
    struct CountingBackend {
        calls: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl CountingBackend {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Summarizer for CountingBackend {
        async fn summarize_one(&self, text: &str) -> Result<String> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(text.to_string());
                calls.len() - 1
            };
            if self.fail_on_call == Some(call) {
                return Err(SummarizationError::request(
                    "backend unavailable",
                    std::io::Error::other("connection reset"),
                )
                .into());
            }
            Ok(format!("sum({})", text.split_whitespace().count()))
        }
    }

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    fn summarizer(backend: Arc<CountingBackend>, chunk_size: usize) -> HierarchicalSummarizer {
        HierarchicalSummarizer::new(backend, WordChunker::new(chunk_size).unwrap())
    }

    #[tokio::test]
    async fn test_3200_words_reduce_to_final_call() {
        let backend = Arc::new(CountingBackend::default());
        let summary = summarizer(backend.clone(), 1500)
            .summarize(&words(3200))
            .await
            .unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].split_whitespace().count(), 1500);
        assert_eq!(calls[1].split_whitespace().count(), 1500);
        assert_eq!(calls[2].split_whitespace().count(), 200);
        assert_eq!(calls[3], "sum(1500) sum(1500) sum(200)");

        assert_eq!(summary.chunk_summaries, vec!["sum(1500)", "sum(1500)", "sum(200)"]);
        assert_eq!(summary.text, "sum(3)");
        assert_eq!(summary.chunk_count(), 3);
    }

    #[tokio::test]
    async fn test_chunk_summaries_join_in_chunk_order() {
        /// Answers `S<i>` where `i` is the chunk's marker word.
        struct IndexedBackend(Mutex<Vec<String>>);

        #[async_trait]
        impl Summarizer for IndexedBackend {
            async fn summarize_one(&self, text: &str) -> Result<String> {
                self.0.lock().unwrap().push(text.to_string());
                let marker = text.split_whitespace().next().unwrap_or_default();
                Ok(format!("S{}", marker.trim_start_matches('c')))
            }
        }

        let text: String = (0..5)
            .map(|i| format!("c{i} filler filler"))
            .collect::<Vec<_>>()
            .join(" ");
        let backend = Arc::new(IndexedBackend(Mutex::new(Vec::new())));
        let summary = HierarchicalSummarizer::new(backend.clone(), WordChunker::new(3).unwrap())
            .summarize(&text)
            .await
            .unwrap();

        let calls = backend.0.lock().unwrap();
        assert_eq!(calls.last().unwrap(), "S0 S1 S2 S3 S4");
        assert_eq!(summary.chunk_summaries, vec!["S0", "S1", "S2", "S3", "S4"]);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let backend = Arc::new(CountingBackend::default());
        for text in ["", "   \n\t "] {
            let err = summarizer(backend.clone(), 1500)
                .summarize(text)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                RecapError::Summarization(SummarizationError::EmptyInput)
            ));
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_chunk_failure_aborts_remaining_chunks() {
        let backend = Arc::new(CountingBackend::failing_on(1));
        let err = summarizer(backend.clone(), 10)
            .summarize(&words(45))
            .await
            .unwrap_err();

        // Chunk 0 succeeded, chunk 1 failed, chunks 2..4 and the final call never ran.
        assert_eq!(backend.calls().len(), 2);
        assert_eq!(err.failed_chunk(), Some(1));
        match err {
            RecapError::ChunkFailure { index, total, source } => {
                assert_eq!(index, 1);
                assert_eq!(total, 5);
                assert!(matches!(*source, RecapError::Summarization(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_final_reduction_failure_is_summarization_error() {
        let backend = Arc::new(CountingBackend::failing_on(2));
        let err = summarizer(backend.clone(), 10)
            .summarize(&words(20))
            .await
            .unwrap_err();

        assert_eq!(backend.calls().len(), 3);
        assert!(matches!(
            err,
            RecapError::Summarization(SummarizationError::Request { .. })
        ));
    }

    #[tokio::test]
    async fn test_single_chunk_is_summarized_twice_by_default() {
        let backend = Arc::new(CountingBackend::default());
        let summary = summarizer(backend.clone(), 1500)
            .summarize(&words(40))
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec![words(40), "sum(40)".to_string()]);
        assert_eq!(summary.text, "sum(1)");
    }

    #[tokio::test]
    async fn test_single_chunk_collapse_skips_final_call() {
        let backend = Arc::new(CountingBackend::default());
        let summary = summarizer(backend.clone(), 1500)
            .collapse_single_chunk(true)
            .summarize(&words(40))
            .await
            .unwrap();

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(summary.text, "sum(40)");
    }

    #[tokio::test]
    async fn test_collapse_does_not_apply_to_multiple_chunks() {
        let backend = Arc::new(CountingBackend::default());
        summarizer(backend.clone(), 10)
            .collapse_single_chunk(true)
            .summarize(&words(15))
            .await
            .unwrap();

        assert_eq!(backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_observer_sees_chunks_then_reduction() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let backend = Arc::new(CountingBackend::default());

        summarizer(backend, 10)
            .with_observer(Arc::new(move |e: &PipelineEvent| sink.lock().unwrap().push(e.clone())))
            .summarize(&words(25))
            .await
            .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                PipelineEvent::ChunkSummarized { index: 0, total: 3 },
                PipelineEvent::ChunkSummarized { index: 1, total: 3 },
                PipelineEvent::ChunkSummarized { index: 2, total: 3 },
                PipelineEvent::FinalReduction { chunks: 3 },
            ]
        );
    }

    #[test]
    fn test_from_settings_rejects_zero_chunk_size() {
        let settings = SummarizationSettings {
            chunk_size: 0,
            ..SummarizationSettings::default()
        };
        let backend = Arc::new(CountingBackend::default());
        assert!(HierarchicalSummarizer::from_settings(backend, &settings).is_err());
    }
}
