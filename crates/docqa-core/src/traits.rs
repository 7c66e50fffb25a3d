use async_trait::async_trait;
use std::path::Path;

use crate::error::{EmbedError, ExtractError, GenerateError};
use crate::types::EmbeddingVector;

/// Produces ordered text fragments for one document.
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &str;
    fn supports(&self, path: &Path) -> bool;
    fn extract(&self, path: &Path) -> Result<Vec<String>, ExtractError>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `azure:text-embedding-ada-002`).
    fn model_id(&self) -> &str;
    /// Embedding dimensionality, or `None` until the provider has answered once.
    fn dim(&self) -> Option<usize>;
    /// Embed a batch; the output is index-aligned with `texts`.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError>;

    async fn embed_query(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        let mut out = self.embed_batch(&[text.to_string()]).await?;
        match out.len() {
            1 => Ok(out.remove(0)),
            got => Err(EmbedError::CountMismatch { expected: 1, got }),
        }
    }
}

#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;
    /// Single-shot completion; no state is carried between calls.
    async fn generate(
        &self,
        instructions: &str,
        context: &str,
        question: &str,
    ) -> Result<String, GenerateError>;
}
