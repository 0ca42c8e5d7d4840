//! Record store.
//!
//! A [`VectorRecordStore`] owns the ordered [`MemoryRecord`] sequence and the
//! [`FlatIndex`] over their embeddings. Both live behind one lock, so record
//! `i` and index slot `i` are always written together and a reader never sees
//! one without the other.

use crate::config::StoreConfig;
use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::index::FlatIndex;
use crate::types::{MemoryRecord, Neighbor};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Thread-safe semantic memory of past findings.
pub struct VectorRecordStore {
    config: StoreConfig,
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    records: Vec<MemoryRecord>,
    index: FlatIndex,
}

impl StoreInner {
    fn check_invariant(&self) {
        debug_assert_eq!(
            self.records.len(),
            self.index.len(),
            "records and index must stay co-indexed"
        );
    }
}

/// Statistics about a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of records.
    pub record_count: usize,
    /// Dimensionality of embeddings.
    pub dimensions: usize,
    /// Distance metric used.
    pub metric: DistanceMetric,
    /// Approximate memory usage in bytes.
    pub memory_bytes: usize,
}

impl VectorRecordStore {
    /// Create an empty store bound to `dimension`, ranked by L2 distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `dimension` is zero.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_config(StoreConfig::new(dimension))
    }

    /// Create an empty store from a full configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let index = FlatIndex::with_capacity(config.dimension, config.metric, config.initial_capacity)?;

        Ok(Self {
            inner: RwLock::new(StoreInner {
                records: Vec::with_capacity(config.initial_capacity),
                index,
            }),
            config,
        })
    }

    /// Get the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the embedding dimension.
    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Get the distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.config.metric
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record and index its embedding in one step.
    ///
    /// Returns the record's position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the embedding length differs from
    /// the store dimension, or [`Error::InvalidVector`] if it contains NaN/Inf.
    /// The store is left untouched on error.
    pub fn insert(&self, record: MemoryRecord) -> Result<usize> {
        let mut inner = self.inner.write();
        let slot = inner.index.push(&record.embedding)?;
        inner.records.push(record);
        inner.check_invariant();

        trace!(slot, "Inserted memory record");
        Ok(slot)
    }

    /// Insert several records under a single write lock.
    ///
    /// Every embedding is validated before anything is written, so a bad
    /// record rejects the whole batch.
    pub fn insert_batch<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = MemoryRecord>,
    {
        let records: Vec<MemoryRecord> = records.into_iter().collect();
        let mut inner = self.inner.write();

        for record in &records {
            inner.index.validate(&record.embedding)?;
        }

        let count = records.len();
        for record in records {
            inner.index.push(&record.embedding)?;
            inner.records.push(record);
        }
        inner.check_invariant();

        debug!(count, "Batch inserted memory records");
        Ok(count)
    }

    /// Return up to `top_k` records nearest to `vector`, nearest first.
    ///
    /// `top_k` larger than the store is clamped; an empty store yields an
    /// empty result. Equal distances keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for `top_k == 0` and
    /// [`Error::DimensionMismatch`] for a query of the wrong length.
    pub fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Neighbor>> {
        if top_k == 0 {
            return Err(Error::Configuration("top_k must be > 0".to_string()));
        }

        let inner = self.inner.read();
        if inner.records.is_empty() {
            return Ok(Vec::new());
        }

        let hits = inner.index.search(vector, top_k)?;
        let neighbors = hits
            .into_iter()
            .map(|(index, distance)| Neighbor {
                index,
                distance,
                record: inner.records[index].clone(),
            })
            .collect::<Vec<_>>();

        debug!(count = neighbors.len(), top_k, "Memory query completed");
        Ok(neighbors)
    }

    /// Get the record at `index`.
    pub fn get(&self, index: usize) -> Option<MemoryRecord> {
        self.inner.read().records.get(index).cloned()
    }

    /// Clone every record in insertion order.
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.inner.read().records.clone()
    }

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.read();
        let text_bytes: usize = inner
            .records
            .iter()
            .map(|r| r.query.len() + r.summary.len() + r.source_url.len())
            .sum();

        StoreStats {
            record_count: inner.records.len(),
            dimensions: self.config.dimension,
            metric: self.config.metric,
            memory_bytes: inner.index.memory_usage() * 2 + text_bytes,
        }
    }
}

impl std::fmt::Debug for VectorRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorRecordStore")
            .field("dimension", &self.config.dimension)
            .field("metric", &self.config.metric)
            .field("len", &self.len())
            .finish()
    }
}
