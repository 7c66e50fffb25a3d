pub mod index;
pub mod retriever;
pub mod similarity;

pub use index::{BuildOptions, VectorIndex};
pub use retriever::Retriever;
pub use similarity::cosine_similarity;
