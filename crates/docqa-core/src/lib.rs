#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod retry;
pub mod terms;
pub mod traits;
pub mod types;

pub use error::{EmbedError, Error, ExtractError, GenerateError, Result, StartupError, Transient};
pub use traits::{Embedder, Generator, TextExtractor};
pub use types::{Answer, EmbeddingVector, IndexEntry, Query, RetrievalResult, ScoredUnit, SourceFragments, TextUnit};
