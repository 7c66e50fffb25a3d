//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested with `__`, e.g. `APP_RETRIEVAL__K=6`). The legacy
//! `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_API_KEY` variables are honored too.
//! [`Settings`] is the typed view the rest of the workspace consumes.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assembler::ChunkingConfig;
use crate::error::StartupError;
use crate::retry::RetryPolicy;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&["AZURE_OPENAI_ENDPOINT", "AZURE_OPENAI_API_KEY"])
                    .map(|key| {
                        if key.as_str().eq_ignore_ascii_case("AZURE_OPENAI_ENDPOINT") {
                            "provider.endpoint".into()
                        } else {
                            "provider.api_key".into()
                        }
                    }),
            );

        Ok(Self { figment })
    }

    /// Wrap an already-assembled figment (tests, embedding callers).
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the typed settings.
    pub fn settings(&self) -> Result<Settings, StartupError> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| StartupError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub provider: ProviderSettings,
    pub retrieval: RetrievalSettings,
    pub chunking: ChunkingConfig,
    pub indexing: IndexingSettings,
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    pub dir: String,
    pub extensions: Vec<String>,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self { dir: "pdf_docs".to_string(), extensions: vec!["pdf".to_string(), "txt".to_string()] }
    }
}

impl CorpusSettings {
    /// Corpus directory after `~`/`$VAR` expansion, relative to the working directory.
    pub fn resolved_dir(&self) -> PathBuf {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        resolve_with_base(&cwd, &self.dir)
    }
}

/// Network endpoint, credential, and deployments of the model provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: String,
    pub embedding_deployment: String,
    pub chat_deployment: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: "2023-03-15-preview".to_string(),
            embedding_deployment: "text-embedding-ada-002".to_string(),
            chat_deployment: "gpt-35-turbo".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8000,
        }
    }
}

// The credential must never reach logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("embedding_deployment", &self.embedding_deployment)
            .field("chat_deployment", &self.chat_deployment)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }

    /// Endpoint without trailing slashes. Only valid after [`Settings::validate`].
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { k: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingSettings {
    pub batch_size: usize,
    pub concurrency: usize,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self { batch_size: 16, concurrency: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { temperature: 0.1, max_tokens: 512 }
    }
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl Settings {
    pub fn validate(&self) -> Result<(), StartupError> {
        if is_blank(self.provider.endpoint.as_ref()) {
            return Err(StartupError::MissingSetting("provider.endpoint"));
        }
        if is_blank(self.provider.api_key.as_ref()) {
            return Err(StartupError::MissingSetting("provider.api_key"));
        }
        if self.retrieval.k == 0 {
            return Err(StartupError::Config("retrieval.k must be at least 1".to_string()));
        }
        if self.indexing.batch_size == 0 || self.indexing.concurrency == 0 {
            return Err(StartupError::Config(
                "indexing.batch_size and indexing.concurrency must be at least 1".to_string(),
            ));
        }
        if self.corpus.extensions.is_empty() {
            return Err(StartupError::Config("corpus.extensions must not be empty".to_string()));
        }
        self.chunking.validate()
    }
}

/// True when the variable is set to `1` or `true` (any case).
pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
