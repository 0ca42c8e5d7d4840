//! Distance metrics for vector ranking.
//!
//! Every metric is expressed as a distance: lower means nearer. The store
//! ranks ascending on this value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance metric used by the flat index.
///
/// - **Euclidean**: the default, matching the sentence-embedding models the
///   research pipeline uses.
/// - **Cosine**: `1 - cos(a, b)`, ignores magnitude.
/// - **Manhattan**: sum of absolute differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance. Range: [0, ∞).
    #[default]
    Euclidean,

    /// Cosine distance. Range: [0, 2].
    Cosine,

    /// Manhattan (L1) distance. Range: [0, ∞).
    Manhattan,
}

impl DistanceMetric {
    /// Compute the distance between two vectors of equal length.
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

        match self {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
            DistanceMetric::Manhattan => manhattan_distance(a, b),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" | "euclid" => Ok(DistanceMetric::Euclidean),
            "cosine" | "cos" => Ok(DistanceMetric::Cosine),
            "manhattan" | "l1" | "taxicab" => Ok(DistanceMetric::Manhattan),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}

#[inline]
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;

    // Four lanes at a time; the tail is handled below.
    let chunks = a.len() / 4;
    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    for idx in chunks * 4..a.len() {
        let d = a[idx] - b[idx];
        sum += d * d;
    }

    sum.sqrt()
}

#[inline]
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[inline]
fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
