//! Lightweight term normalization shared by the offline embedder and generator.

pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it", "its", "of", "on",
    "that", "the", "to", "was", "will", "with", "or", "but", "not", "this", "these", "they", "them", "their", "there",
    "then", "than", "so", "if", "when", "where", "why", "how", "what", "which", "who", "whom", "whose", "can", "could",
    "should", "would", "may", "might", "must", "shall", "do", "does", "did", "have", "had", "having", "i", "you",
    "me", "my", "your", "we", "our", "tell", "about", "please",
];

/// Lowercased alphanumeric tokens, in order.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Tokens that carry meaning: everything except [`STOP_WORDS`].
pub fn content_words(text: &str) -> Vec<String> {
    tokens(text).filter(|t| !STOP_WORDS.contains(&t.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case_are_ignored() {
        let words: Vec<String> = tokens("What is the Warranty-period?").collect();
        assert_eq!(words, vec!["what", "is", "the", "warranty", "period"]);
    }

    #[test]
    fn stop_words_are_dropped() {
        assert_eq!(content_words("What is the capital of Mars?"), vec!["capital", "mars"]);
        assert!(content_words("what is it").is_empty());
    }
}
