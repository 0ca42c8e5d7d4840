//! External Collaborators
//!
//! The research core never fetches, parses, embeds or summarizes anything
//! itself. It drives the capability traits defined here, and the embedding
//! application decides what stands behind them.
//!
//! # Module Structure
//!
//! - [`capabilities`](crate::tools::capabilities) - Capability traits and the [`Capabilities`] bundle
//! - [`search`](crate::tools::search) - DuckDuckGo search and page extraction (feature `web`)
//! - [`triplets`](crate::tools::triplets) - The empty relation extractor
//!
//! # Contracts
//!
//! | Capability | Call | Notes |
//! |------------|------|-------|
//! | [`Retriever`] | `retrieve(query, max_results)` | ordered `{title, url}` |
//! | [`TextExtractor`] | `extract_text(url)` | `None` = nothing to read |
//! | [`Embedder`] | `embed(text)` | length == `dimension()` |
//! | [`ChunkSummarizer`] | `summarize_chunk(chunk)` | one bounded chunk |
//! | [`TripletExtractor`] | `extract_triplets(text)` | may be empty |
//!
//! Other adapters live next to the stack they wrap:
//! `llm::ollama::OllamaSummarizer` (feature `ollama`) and
//! `rag::embeddings::FastEmbedder` (feature `local-embeddings`).

/// Capability traits consumed by the research pipeline.
pub mod capabilities;
/// Web search and page extraction using DuckDuckGo.
#[cfg(feature = "web")]
pub mod search;
/// Relation extractors.
pub mod triplets;

pub use capabilities::{
    Capabilities, ChunkSummarizer, Embedder, Retriever, TextExtractor, TripletExtractor,
};
