//! Locate recognized documents under the corpus directory and extract them.

use docqa_core::{SourceFragments, StartupError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::registry::ExtractorRegistry;

/// List files under `root` whose extension is in `extensions`, sorted by path.
pub fn discover_documents(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, StartupError> {
    if !root.is_dir() {
        return Err(StartupError::MissingDirectory(root.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| extensions.iter().any(|known| ext.eq_ignore_ascii_case(known)));
        if recognized {
            files.push(path.to_path_buf());
        }
    }
    if files.is_empty() {
        return Err(StartupError::NoDocuments(root.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// Discover and extract every document; any extraction failure aborts.
pub fn load_corpus(
    root: &Path,
    extensions: &[String],
    registry: &ExtractorRegistry,
) -> Result<Vec<SourceFragments>, StartupError> {
    let files = discover_documents(root, extensions)?;
    info!("Found {} documents in {}", files.len(), root.display());
    let mut corpus = Vec::with_capacity(files.len());
    for (file_index, path) in files.iter().enumerate() {
        debug!("Extracting file {}/{}: {}", file_index + 1, files.len(), path.display());
        let fragments = registry.extract(path).map_err(|e| StartupError::Extraction {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!("Loaded text from {}", path.display());
        corpus.push(SourceFragments::new(path.clone(), fragments));
    }
    Ok(corpus)
}
