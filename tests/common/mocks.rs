//! Mock capabilities for testing.
//!
//! Deterministic stand-ins for the search, extraction, summarization,
//! embedding and relation-extraction backends, so research runs can be
//! exercised without network access or models.

use async_trait::async_trait;
use delve::tools::{ChunkSummarizer, Embedder, Retriever, TextExtractor, TripletExtractor};
use delve::types::{AppError, Result, Source, Triplet};
use delve::Capabilities;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Embedding width used by [`MockEmbedder::new`].
pub const MOCK_DIMENSION: usize = 8;

/// Chunks containing this marker make [`MockSummarizer`] fail.
pub const FAIL_MARKER: &str = "FAIL";

/// Retriever returning the same fixed sources for every query.
pub struct MockRetriever {
    sources: Vec<Source>,
    should_fail: bool,
    calls: Mutex<Vec<(String, usize)>>,
}

impl MockRetriever {
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources,
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A retriever whose backend is always down.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// `(query, max_results)` of every call so far.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    fn name(&self) -> &str {
        "mock-retriever"
    }

    async fn retrieve(&self, query: &str, max_results: usize) -> Result<Vec<Source>> {
        self.calls.lock().push((query.to_string(), max_results));
        if self.should_fail {
            return Err(AppError::external("retrieve", "search backend offline"));
        }
        Ok(self.sources.iter().take(max_results).cloned().collect())
    }
}

#[derive(Clone)]
enum Page {
    Text(String),
    Empty,
    Failure,
    Delayed(Duration, String),
}

/// Extractor serving canned pages by URL. Unknown URLs have no text.
#[derive(Default)]
pub struct MockExtractor {
    pages: HashMap<String, Page>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), Page::Text(text.to_string()));
        self
    }

    /// The page exists but yields no extractable text.
    pub fn with_empty(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Page::Empty);
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Page::Failure);
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration, text: &str) -> Self {
        self.pages
            .insert(url.to_string(), Page::Delayed(delay, text.to_string()));
        self
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock-extractor"
    }

    async fn extract_text(&self, url: &str) -> Result<Option<String>> {
        match self.pages.get(url).cloned() {
            Some(Page::Text(text)) => Ok(Some(text)),
            Some(Page::Empty) | None => Ok(None),
            Some(Page::Failure) => Err(AppError::external("extract", format!("HTTP 500 for {}", url))),
            Some(Page::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(Some(text))
            }
        }
    }
}

/// Summarizer that prefixes the chunk with `Summary:` and fails on [`FAIL_MARKER`].
#[derive(Default)]
pub struct MockSummarizer {
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChunkSummarizer for MockSummarizer {
    fn name(&self) -> &str {
        "mock-summarizer"
    }

    async fn summarize_chunk(&self, chunk: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if chunk.contains(FAIL_MARKER) {
            return Err(AppError::external("summarize", "model crashed"));
        }
        Ok(format!("Summary:\n{}", chunk.trim()))
    }
}

/// Deterministic byte-histogram embedder.
///
/// Equal texts always map to equal vectors.
pub struct MockEmbedder {
    dimension: usize,
    output_len: usize,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            dimension: MOCK_DIMENSION,
            output_len: MOCK_DIMENSION,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Claims [`MOCK_DIMENSION`] but returns vectors of `len`.
    pub fn wrong_length(len: usize) -> Self {
        Self {
            output_len: len,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.output_len];
        if self.output_len == 0 {
            return vector;
        }
        for (i, byte) in text.bytes().enumerate() {
            vector[(byte as usize + i) % self.output_len] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::external("embed", "embedding service unavailable"));
        }
        Ok(self.vector_for(text))
    }
}

/// Extractor returning the same triplets for every text.
pub struct MockTriplets {
    triplets: Vec<Triplet>,
    should_fail: bool,
    delay: Option<Duration>,
}

impl MockTriplets {
    pub fn new(triplets: Vec<Triplet>) -> Self {
        Self {
            triplets,
            should_fail: false,
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Answers only after `delay`.
    pub fn hanging(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait]
impl TripletExtractor for MockTriplets {
    fn name(&self) -> &str {
        "mock-triplets"
    }

    async fn extract_triplets(&self, _text: &str) -> Result<Vec<Triplet>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err(AppError::external("extract_triplets", "parser error"));
        }
        Ok(self.triplets.clone())
    }
}

/// Handles to every mock behind a [`Capabilities`] bundle.
pub struct MockSet {
    pub retriever: Arc<MockRetriever>,
    pub summarizer: Arc<MockSummarizer>,
    pub embedder: Arc<MockEmbedder>,
    pub capabilities: Capabilities,
}

impl MockSet {
    pub fn new(retriever: MockRetriever, extractor: MockExtractor) -> Self {
        Self::with_embedder(retriever, extractor, MockEmbedder::new())
    }

    pub fn with_embedder(
        retriever: MockRetriever,
        extractor: MockExtractor,
        embedder: MockEmbedder,
    ) -> Self {
        let retriever = Arc::new(retriever);
        let summarizer = Arc::new(MockSummarizer::new());
        let embedder = Arc::new(embedder);
        let capabilities = Capabilities::new(
            retriever.clone(),
            Arc::new(extractor),
            summarizer.clone(),
            embedder.clone(),
        );

        Self {
            retriever,
            summarizer,
            embedder,
            capabilities,
        }
    }
}
