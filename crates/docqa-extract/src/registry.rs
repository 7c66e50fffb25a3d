use docqa_core::{ExtractError, TextExtractor};
use std::path::Path;

use crate::pdf::PdfExtractor;
use crate::text::PlainTextExtractor;

/// Ordered set of extractors; the first one that supports a path wins.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        Self { extractors: Vec::new() }
    }

    pub fn register(&mut self, extractor: Box<dyn TextExtractor>) {
        self.extractors.push(extractor);
    }

    pub fn find(&self, path: &Path) -> Option<&dyn TextExtractor> {
        self.extractors.iter().find(|e| e.supports(path)).map(|e| e.as_ref())
    }

    pub fn extract(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        self.find(path)
            .ok_or_else(|| ExtractError::Unsupported(path.to_path_buf()))?
            .extract(path)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(PdfExtractor::new()));
        registry.register(Box::new(PlainTextExtractor::new()));
        registry
    }
}
