//! Azure OpenAI chat-completions deployment client.

use async_trait::async_trait;
use docqa_core::config::{GenerationSettings, ProviderSettings};
use docqa_core::error::summarize_body;
use docqa_core::retry::RetryPolicy;
use docqa_core::{GenerateError, Generator};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::prompt::render_prompt;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct AzureChatGenerator {
    client: reqwest::Client,
    url: String,
    api_key: String,
    name: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    retry: RetryPolicy,
}

impl std::fmt::Debug for AzureChatGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureChatGenerator")
            .field("url", &self.url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl AzureChatGenerator {
    pub fn new(provider: &ProviderSettings, generation: &GenerationSettings) -> Result<Self, GenerateError> {
        let timeout = provider.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: chat_url(provider),
            api_key: provider.api_key().to_string(),
            name: format!("azure:{}", provider.chat_deployment),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            timeout,
            retry: provider.retry_policy(),
        })
    }

    async fn send_once(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ChatRequest {
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status { status: status.as_u16(), message: summarize_body(&text) });
        }
        let text = response.text().await.map_err(|e| self.map_transport(e))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| GenerateError::Malformed(e.to_string()))?;
        first_content(parsed)
    }

    fn map_transport(&self, e: reqwest::Error) -> GenerateError {
        if e.is_timeout() {
            GenerateError::Timeout(self.timeout)
        } else {
            GenerateError::Request(e.to_string())
        }
    }
}

fn first_content(parsed: ChatResponse) -> Result<String, GenerateError> {
    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerateError::Malformed("response has no choices".to_string()))?
        .message
        .content
        .unwrap_or_default();
    let content = content.trim();
    if content.is_empty() {
        return Err(GenerateError::Malformed("first choice has no content".to_string()));
    }
    Ok(content.to_string())
}

#[async_trait]
impl Generator for AzureChatGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, instructions: &str, context: &str, question: &str) -> Result<String, GenerateError> {
        let prompt = render_prompt(instructions, context, question);
        debug!("Sending {} prompt chars to {}", prompt.len(), self.name);
        self.retry.run("chat completion", || self.send_once(&prompt)).await
    }
}

pub fn chat_url(provider: &ProviderSettings) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        provider.endpoint(),
        provider.chat_deployment,
        provider.api_version
    )
}
