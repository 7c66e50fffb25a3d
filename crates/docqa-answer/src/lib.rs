//! Grounded answer generation over retrieved context.

pub mod azure;
pub mod extractive;
pub mod prompt;

pub use azure::AzureChatGenerator;
pub use extractive::ExtractiveGenerator;
pub use prompt::{is_refusal, render_context, render_prompt, REFUSAL, SYSTEM_INSTRUCTIONS};

use docqa_core::config::{env_flag, GenerationSettings, ProviderSettings};
use docqa_core::{Answer, GenerateError, Generator, Query, RetrievalResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Wraps a [`Generator`] with the fixed grounding instructions.
#[derive(Clone)]
pub struct GroundedAnswerer {
    generator: Arc<dyn Generator>,
}

impl GroundedAnswerer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// One generation call per query; `grounded` is false for the refusal.
    pub async fn answer(&self, query: &Query, context: &RetrievalResult) -> Result<Answer, GenerateError> {
        let rendered = render_context(context);
        let text = self.generator.generate(SYSTEM_INSTRUCTIONS, &rendered, &query.text).await?;
        let text = text.trim().to_string();
        let grounded = !is_refusal(&text);
        debug!("Generated {} chars (grounded: {grounded})", text.len());
        Ok(Answer { text, grounded })
    }
}

pub fn get_default_generator(
    provider: &ProviderSettings,
    generation: &GenerationSettings,
) -> Result<Box<dyn Generator>, GenerateError> {
    if env_flag("APP_USE_FAKE_GENERATION") {
        info!("Using ExtractiveGenerator (APP_USE_FAKE_GENERATION)");
        return Ok(Box::new(ExtractiveGenerator::new()));
    }
    let generator = AzureChatGenerator::new(provider, generation)?;
    info!("Using chat deployment {}", provider.chat_deployment);
    Ok(Box::new(generator))
}
