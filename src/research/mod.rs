//! Research Orchestration
//!
//! This module drives a research run end to end: it breaks a question into
//! sub-queries, pulls sources through the external capabilities, summarizes
//! and scores them, and feeds the results into the semantic memory and the
//! knowledge graph.
//!
//! # Architecture
//!
//! - [`coordinator::ResearchCoordinator`] - Orchestrates runs and owns handles to both stores
//! - [`summarizer::ChunkedSummarizer`] - Chunk-by-chunk summarization with per-chunk fallback
//! - [`critic::critique`] - URL-based credibility policy
//! - [`citation`] - BibTeX references for findings
//!
//! # Usage
//!
//! ```ignore
//! use delve::research::coordinator::ResearchCoordinator;
//!
//! let coordinator = ResearchCoordinator::new(capabilities, memory, graph)?;
//!
//! let run = coordinator.research("quantum computing").await?;
//!
//! println!("{}", run.synthesis.title);
//! for finding in &run.findings {
//!     println!("- {} ({:.2})", finding.url, finding.confidence);
//! }
//! ```
//!
//! # Research Workflow
//!
//! 1. **Decompose** - Three templated sub-questions
//! 2. **Retrieve** - Up to `sources_per_query` sources per sub-question
//! 3. **Extract & Summarize** - Page text, chunked into notes
//! 4. **Critique** - Confidence from the source's domain
//! 5. **Record** - Triplets into the graph, summary embedding into memory
//! 6. **Synthesize** - Title, abstract, findings and references
//!
//! A failing source or chunk never aborts the run. It is logged, recorded as a
//! [`SourceFailure`](crate::types::SourceFailure) and skipped.

/// BibTeX formatting for findings.
pub mod citation;
/// Research run coordination.
pub mod coordinator;
/// Source credibility scoring.
pub mod critic;
/// Chunked summarization.
pub mod summarizer;

pub use coordinator::{ResearchCoordinator, ResearchSettings, SubQueryReport};
pub use critic::critique;
pub use summarizer::{ChunkedSummarizer, Summary};

use crate::types::{AppError, Result};
use std::future::Future;
use std::time::Duration;

/// Await an external call, turning an elapsed deadline into [`AppError::Timeout`].
pub(crate) async fn with_timeout<T, F>(capability: &'static str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout {
            capability,
            seconds: limit.as_secs(),
        }),
    }
}
