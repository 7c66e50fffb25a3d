//! Corpus assembly: extracted fragments in, overlapping retrieval windows out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, StartupError};
use crate::types::{SourceFragments, TextUnit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chars: 1000, overlap_chars: 200 }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.max_chars == 0 {
            return Err(StartupError::Config("chunking.max_chars must be at least 1".to_string()));
        }
        if self.overlap_chars >= self.max_chars {
            return Err(StartupError::Config(format!(
                "chunking.overlap_chars ({}) must be smaller than chunking.max_chars ({})",
                self.overlap_chars, self.max_chars
            )));
        }
        Ok(())
    }
}

/// Chunk every source into bounded, overlapping [`TextUnit`]s.
///
/// Fails with [`Error::EmptyCorpus`] when no source yields any non-blank text.
pub fn assemble(files: &[SourceFragments], config: &ChunkingConfig) -> Result<Vec<TextUnit>, Error> {
    config.validate()?;
    let mut units = Vec::new();
    for file in files {
        let text = file.fragments.join("\n");
        let windows = split_with_overlap(&text, config);
        debug!("{} -> {} units", file.source.display(), windows.len());
        units.extend(windows.into_iter().enumerate().map(|(position, content)| TextUnit {
            content,
            source: file.source.clone(),
            position,
        }));
    }
    if units.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    Ok(units)
}

/// Split `text` into trimmed windows of at most `max_chars` characters.
///
/// Consecutive windows share `overlap_chars` characters, measured from the
/// end of the previous window. Blank windows are dropped.
pub fn split_with_overlap(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    let mut windows = Vec::new();
    let mut start = 0usize;
    while start < total {
        let hard_end = (start + config.max_chars).min(total);
        let end = find_break_point(&chars, start, hard_end);
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            windows.push(trimmed.to_string());
        }
        if end >= total {
            break;
        }
        // Always advance, even when the break point lands inside the overlap.
        start = end.saturating_sub(config.overlap_chars).max(start + 1);
    }
    windows
}

/// Pull `target_end` back to a paragraph break, line break, or sentence end
/// found within the last fifth of the window.
fn find_break_point(chars: &[char], start: usize, target_end: usize) -> usize {
    if target_end >= chars.len() {
        return chars.len();
    }
    let search_start = target_end - (target_end - start) / 5;
    let window = search_start..target_end;

    for i in window.clone().rev() {
        if chars[i] == '\n' && i > search_start && chars[i - 1] == '\n' {
            return i + 1;
        }
    }
    for i in window.clone().rev() {
        if chars[i] == '\n' {
            return i + 1;
        }
    }
    for i in window.rev() {
        if matches!(chars[i], '.' | '!' | '?') && chars.get(i + 1).is_some_and(|c| c.is_whitespace()) {
            return i + 1;
        }
    }
    target_end
}
