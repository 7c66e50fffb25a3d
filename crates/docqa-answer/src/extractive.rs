use async_trait::async_trait;
use docqa_core::terms::content_words;
use docqa_core::{GenerateError, Generator};
use std::collections::HashSet;

use crate::prompt::REFUSAL;

/// Offline generator: answers with the context sentence sharing the most
/// content words with the question, or the refusal when none overlap.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveGenerator;

impl ExtractiveGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn best_sentence(context: &str, question: &str) -> Option<String> {
        let wanted: HashSet<String> = content_words(question).into_iter().collect();
        if wanted.is_empty() {
            return None;
        }
        let mut best: Option<(usize, &str)> = None;
        for sentence in sentences(context) {
            let have: HashSet<String> = content_words(sentence).into_iter().collect();
            let overlap = wanted.intersection(&have).count();
            if overlap > 0 && best.map_or(true, |(score, _)| overlap > score) {
                best = Some((overlap, sentence));
            }
        }
        best.map(|(_, s)| s.to_string())
    }
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(|c: char| matches!(c, '.' | '!' | '?' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[async_trait]
impl Generator for ExtractiveGenerator {
    fn name(&self) -> &str {
        "extractive"
    }

    async fn generate(&self, _instructions: &str, context: &str, question: &str) -> Result<String, GenerateError> {
        Ok(Self::best_sentence(context, question).unwrap_or_else(|| REFUSAL.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Returns are accepted within 30 days.\n\nThe warranty period is 12 months. Batteries are excluded.";

    #[tokio::test]
    async fn picks_the_most_relevant_sentence() {
        let g = ExtractiveGenerator::new();
        let out = g.generate("", CONTEXT, "What is the warranty period?").await.unwrap();
        assert_eq!(out, "The warranty period is 12 months.");
    }

    #[tokio::test]
    async fn refuses_without_overlap() {
        let g = ExtractiveGenerator::new();
        let out = g.generate("", CONTEXT, "What is the capital of Mars?").await.unwrap();
        assert_eq!(out, REFUSAL);
        assert_eq!(g.generate("", "", "warranty?").await.unwrap(), REFUSAL);
    }

    #[test]
    fn first_sentence_wins_ties() {
        let best = ExtractiveGenerator::best_sentence("Days one. Days two.", "days");
        assert_eq!(best.as_deref(), Some("Days one."));
    }
}
