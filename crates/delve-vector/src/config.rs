//! Configuration for delve-vector.

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};

/// Default embedding dimension (all-MiniLM-L6-v2).
pub const DEFAULT_DIMENSION: usize = 384;

/// Configuration for a [`VectorRecordStore`](crate::VectorRecordStore).
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Fixed embedding dimension for every record in the store.
    pub dimension: usize,

    /// Distance metric used for ranking.
    pub metric: DistanceMetric,

    /// Initial record capacity to reserve.
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            metric: DistanceMetric::Euclidean,
            initial_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Create a configuration for the given dimension using L2 distance.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Set the distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Reserve room for `capacity` records up front.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check that the configuration can back a store.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(Error::Configuration(
                "Dimension must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
