//! Word-based chunking of transcripts.
//!
//! Splits text into ordered, contiguous, non-overlapping slices of at most
//! `max_words` whitespace-delimited words. Every chunk but the last is full.

use crate::error::{RecapError, Result};
use serde::{Deserialize, Serialize};

/// Default chunk capacity, roughly five minutes of speech.
pub const DEFAULT_CHUNK_WORDS: usize = 1500;

/// A bounded slice of a transcript's word sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in the transcript.
    pub index: usize,
    /// The chunk's words joined by single spaces.
    pub text: String,
    /// Number of words in this chunk.
    pub word_count: usize,
}

impl Chunk {
    /// Iterate over the chunk's words in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

/// Splits text into chunks of at most `max_words` words.
#[derive(Debug, Clone, Copy)]
pub struct WordChunker {
    max_words: usize,
}

impl WordChunker {
    /// Create a chunker. `max_words` must be positive.
    pub fn new(max_words: usize) -> Result<Self> {
        if max_words == 0 {
            return Err(RecapError::InvalidInput(
                "chunk size must be at least one word".to_string(),
            ));
        }
        Ok(Self { max_words })
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Split `text` into chunks. Empty or whitespace-only text yields no chunks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();

        words
            .chunks(self.max_words)
            .enumerate()
            .map(|(index, slice)| Chunk {
                index,
                text: slice.join(" "),
                word_count: slice.len(),
            })
            .collect()
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_CHUNK_WORDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_chunk_sizes_for_3200_words() {
        let chunker = WordChunker::new(1500).unwrap();
        let chunks = chunker.split(&numbered_words(3200));

        let sizes: Vec<usize> = chunks.iter().map(|c| c.word_count).collect();
        assert_eq!(sizes, vec![1500, 1500, 200]);
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_partition_reconstructs_word_sequence() {
        let text = "  the quick\tbrown fox\n\njumps over   the lazy dog  again ";
        let original: Vec<&str> = text.split_whitespace().collect();

        for size in 1..=12 {
            let chunks = WordChunker::new(size).unwrap().split(text);
            let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| c.words()).collect();
            assert_eq!(rebuilt, original, "chunk size {}", size);

            for chunk in &chunks[..chunks.len() - 1] {
                assert_eq!(chunk.word_count, size);
            }
            assert!(chunks.last().unwrap().word_count <= size);
        }
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        for words in [1usize, 2, 99, 100, 101, 250, 1500, 1501] {
            for size in [1usize, 7, 100, 1500] {
                let chunks = WordChunker::new(size).unwrap().split(&numbered_words(words));
                assert_eq!(chunks.len(), words.div_ceil(size), "W={} S={}", words, size);
            }
        }
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = WordChunker::default().split("only a few words here");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "only a few words here");
        assert_eq!(chunks[0].word_count, 5);
    }

    #[test]
    fn test_empty_and_blank_text_yield_no_chunks() {
        let chunker = WordChunker::default();
        assert!(chunker.split("").is_empty());
        assert!(chunker.split(" \n\t  ").is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(WordChunker::new(0), Err(RecapError::InvalidInput(_))));
    }
}
