//! Flat (exhaustive) nearest-neighbor index.
//!
//! Vectors are packed row-major into one contiguous buffer; slot `i` is the
//! `i`-th inserted vector. Search scans every slot, which is exact and fast
//! enough for session-scale memories (hundreds to low thousands of records).

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Exhaustive index over fixed-dimension vectors.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    /// Row-major vector data, `len * dimensions` floats.
    data: Vec<f32>,
    /// Vector dimensions.
    dimensions: usize,
    /// Distance metric.
    metric: DistanceMetric,
}

impl FlatIndex {
    /// Create an empty index.
    pub fn new(dimensions: usize, metric: DistanceMetric) -> Result<Self> {
        Self::with_capacity(dimensions, metric, 0)
    }

    /// Create an empty index with room for `capacity` vectors.
    pub fn with_capacity(dimensions: usize, metric: DistanceMetric, capacity: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::Configuration("Dimensions must be > 0".to_string()));
        }

        Ok(Self {
            data: Vec::with_capacity(capacity.saturating_mul(dimensions)),
            dimensions,
            metric,
        })
    }

    /// Get the vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check a vector's shape and values without inserting it.
    pub fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        if vector.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidVector(
                "Vector contains NaN or Inf".to_string(),
            ));
        }

        Ok(())
    }

    /// Append a vector and return its slot.
    pub fn push(&mut self, vector: &[f32]) -> Result<usize> {
        self.validate(vector)?;
        let slot = self.len();
        self.data.extend_from_slice(vector);
        Ok(slot)
    }

    /// Get the vector stored at `slot`.
    pub fn vector(&self, slot: usize) -> Option<&[f32]> {
        let start = slot.checked_mul(self.dimensions)?;
        self.data.get(start..start + self.dimensions)
    }

    /// Find the `k` nearest slots to `query`.
    ///
    /// Returns `(slot, distance)` pairs ordered by ascending distance, ties
    /// broken by ascending slot. `k` larger than the index is clamped.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        self.validate(query)?;

        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(slot, v)| (slot, self.metric.distance(query, v)))
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_by(rank);

        Ok(scored)
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<f32>()
    }
}

fn rank(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FlatIndex {
        FlatIndex::new(3, DistanceMetric::Euclidean).unwrap()
    }

    #[test]
    fn test_push_and_search() {
        let mut index = index();
        index.push(&[1.0, 0.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0, 0.0]).unwrap();
        index.push(&[0.9, 0.1, 0.0]).unwrap();

        assert_eq!(index.len(), 3);

        let results = index.search(&[1.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (0, 0.0));
        assert_eq!(results[1].0, 2);
        assert_eq!(results[2].0, 1);
    }

    #[test]
    fn test_zero_dimensions() {
        let result = FlatIndex::new(0, DistanceMetric::Euclidean);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = index();
        let result = index.push(&[1.0, 0.0]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { expected: 3, actual: 2 })
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn test_rejects_nan() {
        let mut index = index();
        assert!(matches!(
            index.push(&[f32::NAN, 0.0, 0.0]),
            Err(Error::InvalidVector(_))
        ));
    }

    #[test]
    fn test_ties_break_by_slot() {
        let mut index = index();
        index.push(&[0.0, 1.0, 0.0]).unwrap();
        index.push(&[1.0, 0.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0, 0.0]).unwrap();
        index.push(&[0.0, 1.0, 0.0]).unwrap();

        let results = index.search(&[0.0, 1.0, 0.0], 2).unwrap();
        let slots: Vec<usize> = results.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, vec![0, 2]);
    }

    #[test]
    fn test_vector_lookup() {
        let mut index = index();
        index.push(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(index.vector(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(index.vector(1), None);
    }

    #[test]
    fn test_empty_search() {
        let index = index();
        assert!(index.search(&[0.0, 0.0, 0.0], 5).unwrap().is_empty());
    }
}
