use docqa_core::{ExtractError, TextExtractor};
use std::fs;
use std::path::Path;

const EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Plain text files become a single fragment. Invalid UTF-8 is replaced, not rejected.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "text"
    }

    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
    }

    fn extract(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => String::from_utf8_lossy(&fs::read(path)?).to_string(),
        };
        if content.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![content])
    }
}
