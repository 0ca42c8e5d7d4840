//! # delve-vector
//!
//! An embedded semantic memory: an append-only sequence of [`MemoryRecord`]s
//! co-indexed with an exact (flat) nearest-neighbor index over their
//! embeddings.
//!
//! ## Features
//!
//! - **Exact search**: exhaustive scan, deterministic ordering (ties keep
//!   insertion order)
//! - **Consistent**: a record and its index slot are written under one lock
//! - **Thread-Safe**: concurrent readers, serialized writers
//! - **Persistence**: JSON snapshots via [`persistence`]
//!
//! ## Quick Start
//!
//! ```rust
//! use delve_vector::{MemoryRecord, VectorRecordStore};
//!
//! let store = VectorRecordStore::new(3)?;
//! store.insert(MemoryRecord::new(
//!     "What is Rust?",
//!     "• A systems programming language",
//!     "https://www.rust-lang.org",
//!     vec![0.1, 0.9, 0.0],
//! ))?;
//!
//! let hits = store.query(&[0.1, 0.9, 0.0], 3)?;
//! assert_eq!(hits[0].distance, 0.0);
//! # Ok::<(), delve_vector::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              VectorRecordStore                │
//! │  ┌────────────── RwLock ───────────────────┐ │
//! │  │  records: Vec<MemoryRecord>   slot i    │ │
//! │  │  index:   FlatIndex           slot i    │ │
//! │  └─────────────────────────────────────────┘ │
//! │  persistence: JSON snapshot (save / load)    │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod distance;
pub mod error;
pub mod index;
pub mod persistence;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::{StoreConfig, DEFAULT_DIMENSION};
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use index::FlatIndex;
pub use persistence::{load_store, save_store};
pub use store::{StoreStats, VectorRecordStore};
pub use types::{MemoryRecord, Neighbor};
