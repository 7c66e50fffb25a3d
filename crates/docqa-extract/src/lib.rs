//! docqa-extract
//!
//! Text extraction for the document corpus: PDF pages via `pdf-extract`,
//! plain text files as-is, and discovery of recognized files on disk.

pub mod corpus;
pub mod pdf;
pub mod registry;
pub mod text;

pub use corpus::{discover_documents, load_corpus};
pub use pdf::PdfExtractor;
pub use registry::ExtractorRegistry;
pub use text::PlainTextExtractor;
