use async_trait::async_trait;
use docqa_core::terms::content_words;
use docqa_core::{EmbedError, Embedder, EmbeddingVector};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Hashed bag-of-words embedder. Texts sharing content words land close
/// together under cosine similarity, which is enough to exercise retrieval
/// without a provider.
#[derive(Debug, Clone)]
pub struct FakeEmbedder {
    dim: usize,
    model_id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1), model_id: format!("fake:xxhash64-{dim}") }
    }

    pub fn embed_text(&self, text: &str) -> EmbeddingVector {
        let mut v = vec![0f32; self.dim];
        for token in content_words(text) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            v[idx] += 1.0 + ((h >> 32) as u32) as f32 / u32::MAX as f32 * 0.1;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dim(&self) -> Option<usize> {
        Some(self.dim)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn deterministic_and_normalized() {
        let e = FakeEmbedder::new(64);
        let a = e.embed_text("The warranty period is 12 months.");
        let b = e.embed_text("The warranty period is 12 months.");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shared_words_score_higher() {
        let e = FakeEmbedder::new(1024);
        let q = e.embed_text("What is the warranty period?");
        let near = e.embed_text("The warranty period is 12 months.");
        let far = e.embed_text("Shipping takes five business days.");
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }

    #[test]
    fn stop_word_only_text_is_the_zero_vector() {
        let e = FakeEmbedder::new(8);
        assert!(e.embed_text("what is it").iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn batch_is_index_aligned() {
        let e = FakeEmbedder::new(32);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let out = e.embed_batch(&texts).await.unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], e.embed_text("beta"));
        assert_eq!(e.embed_query("alpha").await.unwrap(), out[0]);
    }
}
