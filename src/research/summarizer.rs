use crate::rag::chunker::TextChunker;
use crate::research::with_timeout;
use crate::tools::capabilities::ChunkSummarizer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Returned for blank input instead of calling the summarizer.
pub const EMPTY_TEXT_NOTE: &str = "No content to summarize.";
/// Stands in for the note of a chunk that could not be summarized.
pub const FAILED_CHUNK_NOTE: &str = "⚠️ Error summarizing chunk";

const NOTE_SEPARATOR: &str = "\n\n";

/// Result of summarizing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Bullet notes, one per chunk, separated by blank lines.
    pub text: String,
    pub chunks: usize,
    /// One message per chunk that fell back to [`FAILED_CHUNK_NOTE`].
    pub errors: Vec<String>,
}

impl Summary {
    pub fn failed_chunks(&self) -> usize {
        self.errors.len()
    }

    /// True when every chunk fell back to [`FAILED_CHUNK_NOTE`].
    pub fn all_failed(&self) -> bool {
        self.chunks > 0 && self.failed_chunks() == self.chunks
    }
}

/// Summarizes long text chunk by chunk, degrading per chunk.
#[derive(Clone)]
pub struct ChunkedSummarizer {
    summarizer: Arc<dyn ChunkSummarizer>,
    chunker: TextChunker,
    timeout: Duration,
}

impl ChunkedSummarizer {
    pub fn new(summarizer: Arc<dyn ChunkSummarizer>, chunk_size: usize, timeout: Duration) -> Self {
        Self {
            summarizer,
            chunker: TextChunker::new(chunk_size, 0),
            timeout,
        }
    }

    /// Summarize every chunk in order. Never fails: a chunk that errors or
    /// times out contributes [`FAILED_CHUNK_NOTE`] instead of a note.
    pub async fn summarize(&self, text: &str) -> Summary {
        if text.trim().is_empty() {
            return Summary {
                text: EMPTY_TEXT_NOTE.to_string(),
                chunks: 0,
                errors: Vec::new(),
            };
        }

        let chunks = self.chunker.chunk(text);
        let mut notes = Vec::with_capacity(chunks.len());
        let mut errors = Vec::new();

        for (i, chunk) in chunks.iter().enumerate() {
            let result = with_timeout(
                "summarize",
                self.timeout,
                self.summarizer.summarize_chunk(chunk),
            )
            .await;

            match result {
                Ok(note) => notes.push(format!("• {}", note.replace('\n', " ").trim())),
                Err(e) => {
                    warn!(chunk = i, error = %e, "Error summarizing chunk");
                    errors.push(e.to_string());
                    notes.push(FAILED_CHUNK_NOTE.to_string());
                }
            }
        }

        debug!(
            chunks = chunks.len(),
            failed = errors.len(),
            summarizer = self.summarizer.name(),
            "Summarized text"
        );

        Summary {
            text: notes.join(NOTE_SEPARATOR),
            chunks: chunks.len(),
            errors,
        }
    }
}
