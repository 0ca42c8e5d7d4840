//! # delve - query-driven research assistant
//!
//! delve takes a natural-language research question, breaks it into
//! sub-questions, reads and summarizes web sources, scores their credibility
//! and assembles a report payload. Along the way it builds two long-lived
//! stores: a semantic memory of past findings and a knowledge graph of
//! extracted facts.
//!
//! ## Overview
//!
//! delve can be used in two ways:
//!
//! 1. **As a command-line tool** - Run the `delve` binary
//! 2. **As a library** - Plug your own search, extraction, summarization and
//!    embedding backends into [`ResearchCoordinator`]
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use delve::{Capabilities, KnowledgeGraph, ResearchCoordinator};
//! use delve_vector::VectorRecordStore;
//! use std::sync::Arc;
//!
//! let capabilities = Capabilities::new(retriever, extractor, summarizer, embedder);
//! let memory = Arc::new(VectorRecordStore::new(384)?);
//! let graph = Arc::new(KnowledgeGraph::new());
//!
//! let coordinator = ResearchCoordinator::new(capabilities, memory, graph)?;
//! let run = coordinator.research("quantum computing").await?;
//!
//! for finding in &run.findings {
//!     println!("{} ({:.2})", finding.title, finding.confidence);
//! }
//!
//! let hits = coordinator.recall("who builds qubits?", 3).await?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama chunk summarizer (default) |
//! | `web` | DuckDuckGo search and page extraction via daedra (default) |
//! | `local-embeddings` | fastembed all-MiniLM-L6-v2 embedder |
//!
//! ## Modules
//!
//! - [`graph`] - Knowledge-graph accumulator
//! - [`research`] - Research coordination, summarization, critique and citations
//! - [`tools`] - Capability traits for external collaborators
//! - [`llm`] - LLM-backed capabilities
//! - [`rag`] - Chunking and embeddings
//! - [`types`] - Common types and error handling
//! - [`utils`] - `delve.toml` configuration
//!
//! The semantic memory lives in the `delve-vector` workspace crate.
//!
//! ## Architecture
//!
//! ```text
//!                 ResearchCoordinator
//!      decompose ─► run_sub_query ×3 ─► synthesize
//!                        │
//!   retrieve ─► extract ─► summarize ─► critique
//!                        │
//!          ┌─────────────┴─────────────┐
//!   KnowledgeGraph.merge     VectorRecordStore.insert
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line interface.
pub mod cli;
/// Knowledge-graph accumulation.
pub mod graph;
/// LLM-backed capabilities.
pub mod llm;
/// Text chunking and embeddings.
pub mod rag;
/// Research run orchestration.
pub mod research;
/// Capability traits and default adapters.
pub mod tools;
/// Core types (records, runs, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use graph::{Entity, EntityKind, KnowledgeGraph, MergeStats};
pub use research::{ResearchCoordinator, ResearchSettings, SubQueryReport, critique};
pub use tools::{
    Capabilities, ChunkSummarizer, Embedder, Retriever, TextExtractor, TripletExtractor,
};
pub use types::{
    AppError, FindingRecord, ResearchRun, Result, Source, SourceFailure, Stage, SynthesisRecord,
    Triplet,
};
pub use utils::toml_config::{ConfigError, DelveConfig};
