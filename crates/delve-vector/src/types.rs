//! Common types for delve-vector.

use serde::{Deserialize, Serialize};

/// One remembered finding: the sub-query that produced it, the note text,
/// where it came from, and the embedding it is indexed under.
///
/// Records are immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Sub-query that produced this record.
    pub query: String,
    /// Final human-readable note text.
    pub summary: String,
    /// URL of the source the summary was drawn from.
    pub source_url: String,
    /// Embedding of the summary; its length equals the store dimension.
    pub embedding: Vec<f32>,
}

impl MemoryRecord {
    /// Create a new record.
    pub fn new(
        query: impl Into<String>,
        summary: impl Into<String>,
        source_url: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            query: query.into(),
            summary: summary.into(),
            source_url: source_url.into(),
            embedding,
        }
    }
}

/// A record returned from a nearest-neighbor query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Position of the record in insertion order.
    pub index: usize,
    /// Distance to the query vector (lower is nearer).
    pub distance: f32,
    /// The matched record.
    pub record: MemoryRecord,
}
