//! Knowledge Graph Accumulation
//!
//! Relation triplets extracted from many independent summarization passes are
//! merged into one deduplicated directed graph that only ever grows.
//!
//! # Usage
//!
//! ```
//! use delve::graph::KnowledgeGraph;
//! use delve::types::Triplet;
//!
//! let graph = KnowledgeGraph::new();
//! graph.merge([
//!     Triplet::new("Rust", "developed_by", "Mozilla"),
//!     Triplet::new("Rust", "influenced_by", "OCaml"),
//! ]);
//!
//! assert_eq!(graph.entity_count(), 3);
//! assert!(graph.has_edge("Rust", "developed_by", "Mozilla"));
//! ```

/// Deduplicating triplet accumulator.
pub mod knowledge;

pub use knowledge::{Entity, EntityKind, KnowledgeGraph, MergeStats};
