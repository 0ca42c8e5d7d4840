//! Text Preparation and Embedding
//!
//! # Module Structure
//!
//! - [`rag::chunker`](crate::rag::chunker) - Fixed-size character chunking for length-limited summarizers
//! - `rag::embeddings` - Local dense embeddings via fastembed (feature `local-embeddings`)
//!
//! Summarizers accept bounded input, so extracted page text is cut into
//! [`chunker::DEFAULT_CHUNK_SIZE`]-character windows before summarization.
//!
//! # Example
//!
//! ```
//! use delve::rag::chunker::TextChunker;
//!
//! let chunks = TextChunker::new(800, 0).chunk(&"x".repeat(1700));
//! assert_eq!(chunks.len(), 3);
//! ```

pub mod chunker;
#[cfg(feature = "local-embeddings")]
pub mod embeddings;
