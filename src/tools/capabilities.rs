use crate::types::{Result, Source, Triplet};
use async_trait::async_trait;
use std::sync::Arc;

/// Web or document search.
#[async_trait]
pub trait Retriever: Send + Sync {
    fn name(&self) -> &str;

    /// Return up to `max_results` candidate sources, best first.
    async fn retrieve(&self, query: &str, max_results: usize) -> Result<Vec<Source>>;
}

/// Fetch a page and reduce it to readable text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the page had nothing extractable; that is not an error.
    async fn extract_text(&self, url: &str) -> Result<Option<String>>;
}

/// Text-to-vector embedding.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn name(&self) -> &str;

    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Abstractive summarization of one bounded chunk.
#[async_trait]
pub trait ChunkSummarizer: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize_chunk(&self, chunk: &str) -> Result<String>;
}

/// Relation extraction. Returning no triplets is a legitimate answer.
#[async_trait]
pub trait TripletExtractor: Send + Sync {
    fn name(&self) -> &str;

    async fn extract_triplets(&self, text: &str) -> Result<Vec<Triplet>>;
}

/// The set of external collaborators a research run drives.
#[derive(Clone)]
pub struct Capabilities {
    pub retriever: Arc<dyn Retriever>,
    pub extractor: Arc<dyn TextExtractor>,
    pub summarizer: Arc<dyn ChunkSummarizer>,
    pub embedder: Arc<dyn Embedder>,
    pub triplets: Arc<dyn TripletExtractor>,
}

impl Capabilities {
    /// Bundle the required collaborators; relation extraction defaults to
    /// [`NoTriplets`](crate::tools::triplets::NoTriplets).
    pub fn new(
        retriever: Arc<dyn Retriever>,
        extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn ChunkSummarizer>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            retriever,
            extractor,
            summarizer,
            embedder,
            triplets: Arc::new(crate::tools::triplets::NoTriplets),
        }
    }

    pub fn with_triplet_extractor(mut self, triplets: Arc<dyn TripletExtractor>) -> Self {
        self.triplets = triplets;
        self
    }

    /// Names of the bundled collaborators, for logging.
    pub fn describe(&self) -> String {
        format!(
            "retriever={} extractor={} summarizer={} embedder={} triplets={}",
            self.retriever.name(),
            self.extractor.name(),
            self.summarizer.name(),
            self.embedder.name(),
            self.triplets.name()
        )
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Capabilities").field(&self.describe()).finish()
    }
}
