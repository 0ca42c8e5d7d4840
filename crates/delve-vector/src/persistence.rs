//! Persistence layer for delve-vector.
//!
//! A store is written as a single JSON snapshot holding its dimension, metric
//! and records in insertion order. Loading rebuilds the index by re-inserting
//! every record, so a snapshot with a malformed embedding is rejected rather
//! than producing a store whose index and records disagree.

use crate::config::StoreConfig;
use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::store::VectorRecordStore;
use crate::types::MemoryRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    dimension: usize,
    metric: DistanceMetric,
    records: Vec<MemoryRecord>,
}

/// Save a store to `path`, creating parent directories as needed.
pub async fn save_store(path: &Path, store: &VectorRecordStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        dimension: store.dimension(),
        metric: store.metric(),
        records: store.records(),
    };

    let json = serde_json::to_string(&snapshot)
        .map_err(|e| Error::Persistence(format!("Failed to serialize snapshot: {}", e)))?;

    // Write beside the target then rename, so a crash never leaves half a file.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    info!(path = ?path, records = snapshot.records.len(), "Saved memory snapshot");
    Ok(())
}

/// Load a store from a snapshot at `path`.
pub async fn load_store(path: &Path) -> Result<VectorRecordStore> {
    let json = tokio::fs::read_to_string(path).await?;
    let snapshot: Snapshot = serde_json::from_str(&json)
        .map_err(|e| Error::Persistence(format!("Failed to parse snapshot: {}", e)))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::Persistence(format!(
            "Unsupported snapshot version {}",
            snapshot.version
        )));
    }

    let config = StoreConfig::new(snapshot.dimension)
        .with_metric(snapshot.metric)
        .with_capacity(snapshot.records.len());
    let store = VectorRecordStore::with_config(config)?;
    let count = store.insert_batch(snapshot.records)?;

    info!(path = ?path, records = count, "Loaded memory snapshot");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_metric() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory").join("snapshot.json");

        let store =
            VectorRecordStore::with_config(StoreConfig::new(2).with_metric(DistanceMetric::Cosine)).unwrap();
        store.insert(MemoryRecord::new("q1", "s1", "u1", vec![1.0, 0.0])).unwrap();
        store.insert(MemoryRecord::new("q2", "s2", "u2", vec![0.0, 1.0])).unwrap();

        save_store(&path, &store).await.unwrap();
        let loaded = load_store(&path).await.unwrap();

        assert_eq!(loaded.metric(), DistanceMetric::Cosine);
        assert_eq!(loaded.records(), store.records());
    }

    #[tokio::test]
    async fn test_load_rejects_bad_embedding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let json = r#"{"version":1,"dimension":3,"metric":"euclidean","records":[
            {"query":"q","summary":"s","source_url":"u","embedding":[1.0,2.0]}
        ]}"#;
        tokio::fs::write(&path, json).await.unwrap();

        let result = load_store(&path).await;
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_store(Path::new("/nonexistent/delve/snapshot.json")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
