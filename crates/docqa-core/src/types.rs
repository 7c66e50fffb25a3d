//! Domain types shared by the assembler, index, and answerer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type EmbeddingVector = Vec<f32>;

/// Raw text produced by a Text Extractor for one file.
///
/// `fragments` keeps document order: one entry per page (PDF) or per file
/// (plain text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFragments {
    pub source: PathBuf,
    pub fragments: Vec<String>,
}

impl SourceFragments {
    pub fn new(source: impl Into<PathBuf>, fragments: Vec<String>) -> Self {
        Self { source: source.into(), fragments }
    }
}

/// A retrieval-sized window of one source document.
///
/// - `content`: trimmed, never empty
/// - `source`: path of the originating file
/// - `position`: ordinal of this window within its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub content: String,
    pub source: PathBuf,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub vector: EmbeddingVector,
    pub unit: TextUnit,
}

/// A unit returned by a query together with its similarity score.
///
/// Higher is better; scores are cosine similarities in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredUnit {
    pub unit: TextUnit,
    pub score: f32,
}

/// Top-K hits ranked by descending similarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    pub hits: Vec<ScoredUnit>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn units(&self) -> impl Iterator<Item = &TextUnit> {
        self.hits.iter().map(|h| &h.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
}

impl Query {
    /// Build a query from a raw input line, stripping surrounding whitespace.
    pub fn new(raw: &str) -> Self {
        Self { text: raw.trim().to_string() }
    }
}

/// `grounded` is false when the generator returned the refusal sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub grounded: bool,
}
