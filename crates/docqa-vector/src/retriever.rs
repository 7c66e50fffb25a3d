use docqa_core::{EmbedError, Embedder, Query, RetrievalResult};
use std::sync::Arc;
use tracing::debug;

use crate::index::VectorIndex;

/// Embeds a query and looks up its nearest units.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>, k: usize) -> Self {
        Self { index, embedder, k }
    }

    pub async fn retrieve(&self, query: &Query) -> Result<RetrievalResult, EmbedError> {
        let vector = self.embedder.embed_query(&query.text).await?;
        if let Some(dim) = self.index.dim() {
            if vector.len() != dim {
                return Err(EmbedError::DimensionMismatch { expected: dim, got: vector.len() });
            }
        }
        let result = self.index.query(&vector, self.k);
        debug!(
            "Retrieved {} units for query (top score {:?})",
            result.len(),
            result.hits.first().map(|h| h.score)
        );
        Ok(result)
    }
}
