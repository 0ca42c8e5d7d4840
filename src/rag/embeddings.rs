use crate::tools::capabilities::Embedder;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;
use std::sync::Arc;

/// Output width of all-MiniLM-L6-v2.
pub const MINILM_DIMENSION: usize = 384;

/// Local sentence embeddings via fastembed (all-MiniLM-L6-v2).
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Load the model, downloading it on first use.
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    fn name(&self) -> &str {
        "fastembed-minilm"
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        // Inference is CPU-bound.
        let mut vectors = tokio::task::spawn_blocking(move || model.lock().embed(vec![text], None))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::external("embed", e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| AppError::external("embed", "model returned no vectors"))
    }
}
