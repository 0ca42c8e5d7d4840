use crate::tools::capabilities::TripletExtractor;
use crate::types::{Result, Triplet};
use async_trait::async_trait;

/// Relation extractor that never finds anything.
///
/// The default until an embedding application plugs in a real extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTriplets;

#[async_trait]
impl TripletExtractor for NoTriplets {
    fn name(&self) -> &str {
        "none"
    }

    async fn extract_triplets(&self, _text: &str) -> Result<Vec<Triplet>> {
        Ok(Vec::new())
    }
}
