//! Azure OpenAI embeddings deployment client.

use async_trait::async_trait;
use docqa_core::config::ProviderSettings;
use docqa_core::retry::RetryPolicy;
use docqa_core::error::summarize_body;
use docqa_core::{EmbedError, Embedder, EmbeddingVector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

pub struct AzureOpenAiEmbedder {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model_id: String,
    timeout: Duration,
    retry: RetryPolicy,
    dim: OnceLock<usize>,
}

impl std::fmt::Debug for AzureOpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiEmbedder")
            .field("url", &self.url)
            .field("model_id", &self.model_id)
            .field("dim", &self.dim.get())
            .finish_non_exhaustive()
    }
}

impl AzureOpenAiEmbedder {
    pub fn new(provider: &ProviderSettings) -> Result<Self, EmbedError> {
        let timeout = provider.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbedError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: embeddings_url(provider),
            api_key: provider.api_key().to_string(),
            model_id: format!("azure:{}", provider.embedding_deployment),
            timeout,
            retry: provider.retry_policy(),
            dim: OnceLock::new(),
        })
    }

    async fn send_once(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&EmbeddingRequest { input: texts })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedError::Status { status: status.as_u16(), message: summarize_body(&body) });
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        let parsed: EmbeddingResponse =
            serde_json::from_str(&body).map_err(|e| EmbedError::Malformed(e.to_string()))?;
        self.collect_vectors(parsed, texts.len())
    }

    fn collect_vectors(&self, parsed: EmbeddingResponse, expected: usize) -> Result<Vec<EmbeddingVector>, EmbedError> {
        let mut data = parsed.data;
        if data.len() != expected {
            return Err(EmbedError::CountMismatch { expected, got: data.len() });
        }
        data.sort_by_key(|d| d.index);
        let vectors: Vec<EmbeddingVector> = data.into_iter().map(|d| d.embedding).collect();
        for v in &vectors {
            let known = *self.dim.get_or_init(|| v.len());
            if v.len() != known || known == 0 {
                return Err(EmbedError::DimensionMismatch { expected: known, got: v.len() });
            }
        }
        Ok(vectors)
    }

    fn map_transport(&self, e: reqwest::Error) -> EmbedError {
        if e.is_timeout() {
            EmbedError::Timeout(self.timeout)
        } else {
            EmbedError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl Embedder for AzureOpenAiEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dim(&self) -> Option<usize> {
        self.dim.get().copied()
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Embedding batch of {} texts with {}", texts.len(), self.model_id);
        self.retry.run("embedding request", || self.send_once(texts)).await
    }
}

pub fn embeddings_url(provider: &ProviderSettings) -> String {
    format!(
        "{}/openai/deployments/{}/embeddings?api-version={}",
        provider.endpoint(),
        provider.embedding_deployment,
        provider.api_version
    )
}
