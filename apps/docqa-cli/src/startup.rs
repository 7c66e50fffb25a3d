//! One-time construction of everything a session needs.

use docqa_answer::{get_default_generator, GroundedAnswerer};
use docqa_core::assembler::assemble;
use docqa_core::config::Settings;
use docqa_core::{Answer, Embedder, Error, Generator, Query};
use docqa_embed::get_default_embedder;
use docqa_extract::{load_corpus, ExtractorRegistry};
use docqa_vector::{BuildOptions, Retriever, VectorIndex};
use std::sync::Arc;
use tracing::info;

/// Immutable after [`bootstrap`]; sessions only borrow it.
pub struct AppContext {
    pub settings: Settings,
    pub index: Arc<VectorIndex>,
    pub embedder: Arc<dyn Embedder>,
    pub generator: Arc<dyn Generator>,
    retriever: Retriever,
    answerer: GroundedAnswerer,
}

impl AppContext {
    pub fn new(
        settings: Settings,
        index: Arc<VectorIndex>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        let retriever = Retriever::new(index.clone(), embedder.clone(), settings.retrieval.k);
        let answerer = GroundedAnswerer::new(generator.clone());
        Self { settings, index, embedder, generator, retriever, answerer }
    }

    /// Retrieve context for `query` and generate a grounded answer.
    pub async fn answer_query(&self, query: &Query) -> Result<Answer, Error> {
        let context = self.retriever.retrieve(query).await?;
        let answer = self.answerer.answer(query, &context).await?;
        Ok(answer)
    }
}

pub async fn bootstrap(settings: Settings) -> Result<AppContext, Error> {
    let dir = settings.corpus.resolved_dir();
    let registry = ExtractorRegistry::default();
    let corpus = load_corpus(&dir, &settings.corpus.extensions, &registry)?;

    let units = assemble(&corpus, &settings.chunking)?;
    info!("Assembled {} text units from {} documents", units.len(), corpus.len());

    let embedder: Arc<dyn Embedder> = Arc::from(get_default_embedder(&settings.provider)?);
    let opts = BuildOptions {
        batch_size: settings.indexing.batch_size,
        concurrency: settings.indexing.concurrency,
    };
    let index = Arc::new(VectorIndex::build(units, embedder.as_ref(), opts).await?);

    let generator: Arc<dyn Generator> =
        Arc::from(get_default_generator(&settings.provider, &settings.generation)?);
    info!("Ready: {} indexed units, generator {}", index.len(), generator.name());

    Ok(AppContext::new(settings, index, embedder, generator))
}
