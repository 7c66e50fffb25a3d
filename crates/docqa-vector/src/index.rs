//! In-memory vector index over text units.

use docqa_core::{EmbedError, Embedder, EmbeddingVector, IndexEntry, RetrievalResult, ScoredUnit, TextUnit};
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::similarity::cosine_similarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub batch_size: usize,
    /// Batches allowed in flight at once.
    pub concurrency: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { batch_size: 16, concurrency: 4 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dim: Option<usize>,
}

fn hash_content(s: &str) -> blake3::Hash {
    blake3::hash(s.as_bytes())
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

// NaN sorts below every real score.
fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed every unit and index it. Identical contents are embedded once.
    /// Any provider error aborts the build.
    pub async fn build(units: Vec<TextUnit>, embedder: &dyn Embedder, opts: BuildOptions) -> Result<Self, EmbedError> {
        let mut unique: Vec<String> = Vec::new();
        let mut seen: HashMap<blake3::Hash, usize> = HashMap::new();
        let mut slots = Vec::with_capacity(units.len());
        for unit in &units {
            let slot = *seen.entry(hash_content(&unit.content)).or_insert_with(|| {
                unique.push(unit.content.clone());
                unique.len() - 1
            });
            slots.push(slot);
        }
        if unique.len() < units.len() {
            debug!("Deduplicated {} units into {} distinct texts", units.len(), unique.len());
        }

        let pb = progress_bar(unique.len());
        pb.set_message(embedder.model_id().to_string());
        let mut batches = stream::iter(unique.chunks(opts.batch_size.max(1)))
            .map(|batch| async move {
                let vectors = embedder.embed_batch(batch).await?;
                if vectors.len() != batch.len() {
                    return Err(EmbedError::CountMismatch { expected: batch.len(), got: vectors.len() });
                }
                Ok::<_, EmbedError>(vectors)
            })
            .buffered(opts.concurrency.max(1));

        let mut vectors: Vec<EmbeddingVector> = Vec::with_capacity(unique.len());
        while let Some(batch) = batches.next().await {
            let batch = match batch {
                Ok(batch) => batch,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };
            pb.inc(batch.len() as u64);
            vectors.extend(batch);
        }
        pb.finish_and_clear();

        let mut index = Self::new();
        for (unit, slot) in units.into_iter().zip(slots) {
            index.insert(vectors[slot].clone(), unit)?;
        }
        info!("Indexed {} units (dim {})", index.len(), index.dim.unwrap_or(0));
        Ok(index)
    }

    /// Add one entry. The first vector fixes the index dimensionality.
    pub fn insert(&mut self, vector: EmbeddingVector, unit: TextUnit) -> Result<(), EmbedError> {
        match self.dim {
            Some(dim) if dim != vector.len() => {
                return Err(EmbedError::DimensionMismatch { expected: dim, got: vector.len() });
            }
            Some(_) => {}
            None if vector.is_empty() => {
                return Err(EmbedError::Malformed("empty embedding vector".to_string()));
            }
            None => self.dim = Some(vector.len()),
        }
        self.entries.push(IndexEntry { vector, unit });
        Ok(())
    }

    /// Top-`k` entries by descending cosine similarity. Equal scores keep
    /// insertion order.
    pub fn query(&self, vector: &[f32], k: usize) -> RetrievalResult {
        if k == 0 || self.entries.is_empty() {
            return RetrievalResult::default();
        }
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(vector, &e.vector)))
            .collect();
        scored.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));
        scored.truncate(k);
        RetrievalResult {
            hits: scored
                .into_iter()
                .map(|(i, score)| ScoredUnit { unit: self.entries[i].unit.clone(), score })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unit(content: &str, position: usize) -> TextUnit {
        TextUnit { content: content.to_string(), source: PathBuf::from("doc.txt"), position }
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = VectorIndex::new();
        assert!(index.query(&[1.0, 0.0], 4).is_empty());
    }

    #[test]
    fn zero_k_returns_nothing() {
        let mut index = VectorIndex::new();
        index.insert(vec![1.0, 0.0], unit("a", 0)).unwrap();
        assert!(index.query(&[1.0, 0.0], 0).is_empty());
    }

    #[test]
    fn results_are_ranked_and_capped_at_len() {
        let mut index = VectorIndex::new();
        index.insert(vec![0.0, 1.0], unit("north", 0)).unwrap();
        index.insert(vec![1.0, 0.0], unit("east", 1)).unwrap();
        index.insert(vec![1.0, 1.0], unit("north-east", 2)).unwrap();

        let result = index.query(&[1.0, 0.1], 10);
        let order: Vec<&str> = result.units().map(|u| u.content.as_str()).collect();
        assert_eq!(order, vec!["east", "north-east", "north"]);
        assert!(result.hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut index = VectorIndex::new();
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            index.insert(vec![2.0, 0.0], unit(name, i)).unwrap();
        }
        let result = index.query(&[1.0, 0.0], 2);
        let order: Vec<&str> = result.units().map(|u| u.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn nan_scores_rank_last() {
        let mut index = VectorIndex::new();
        index.insert(vec![f32::NAN, 0.0], unit("broken", 0)).unwrap();
        index.insert(vec![-1.0, 0.0], unit("opposite", 1)).unwrap();
        let result = index.query(&[1.0, 0.0], 2);
        assert_eq!(result.hits[0].unit.content, "opposite");
        assert!(result.hits[1].score.is_nan());
    }

    #[test]
    fn dimension_is_enforced() {
        let mut index = VectorIndex::new();
        index.insert(vec![1.0, 0.0, 0.0], unit("a", 0)).unwrap();
        let err = index.insert(vec![1.0, 0.0], unit("b", 1)).unwrap_err();
        assert!(matches!(err, EmbedError::DimensionMismatch { expected: 3, got: 2 }));
        assert_eq!(index.len(), 1);
        assert!(VectorIndex::new().insert(Vec::new(), unit("c", 0)).is_err());
    }
}
