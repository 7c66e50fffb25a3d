//! Embedding providers.
//!
//! [`AzureOpenAiEmbedder`] calls the hosted embedding deployment;
//! [`FakeEmbedder`] is a deterministic offline stand-in selected with
//! `APP_USE_FAKE_EMBEDDINGS=1` for tests and development.

pub mod azure;
pub mod fake;

pub use azure::AzureOpenAiEmbedder;
pub use fake::FakeEmbedder;

use docqa_core::config::{env_flag, ProviderSettings};
use docqa_core::{EmbedError, Embedder};
use tracing::info;

pub const FAKE_EMBEDDING_DIM: usize = 1024;

pub fn get_default_embedder(provider: &ProviderSettings) -> Result<Box<dyn Embedder>, EmbedError> {
    if env_flag("APP_USE_FAKE_EMBEDDINGS") {
        info!("Using FakeEmbedder (APP_USE_FAKE_EMBEDDINGS)");
        return Ok(Box::new(FakeEmbedder::new(FAKE_EMBEDDING_DIM)));
    }
    let embedder = AzureOpenAiEmbedder::new(provider)?;
    info!("Using embedding deployment {}", provider.embedding_deployment);
    Ok(Box::new(embedder))
}
