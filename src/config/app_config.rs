use serde::Deserialize;

use crate::domain::{ChunkingConfig, DomainError};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub azure_openai: AzureOpenAiSettings,
    pub embedding: EmbeddingSettings,
    pub rag: RagSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Azure OpenAI resource and deployments
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AzureOpenAiSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub chat_deployment: String,
    pub embedding_deployment: String,
    pub temperature: f32,
    pub seed: Option<u64>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    #[default]
    #[serde(rename = "azure_openai")]
    AzureOpenAi,
    /// Local feature hashing, no network
    Hashing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderKind,
    /// Vector size for the hashing provider
    pub dimensions: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AzureOpenAiSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "2024-02-15-preview".to_string(),
            chat_deployment: String::new(),
            embedding_deployment: "text-embedding-ada-002".to_string(),
            temperature: 0.5,
            seed: Some(50),
            timeout_secs: 60,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            dimensions: 256,
        }
    }
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 20,
            top_k: 4,
        }
    }
}

impl AzureOpenAiSettings {
    /// Check the fields needed before any chat call is made
    pub fn validate_chat(&self) -> Result<(), DomainError> {
        self.require("endpoint", &self.endpoint)?;
        self.require("api_key", &self.api_key)?;
        self.require("chat_deployment", &self.chat_deployment)?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::configuration(format!(
                "azure_openai.temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        Ok(())
    }

    /// Check the fields needed for the Azure embeddings endpoint
    pub fn validate_embeddings(&self) -> Result<(), DomainError> {
        self.require("endpoint", &self.endpoint)?;
        self.require("api_key", &self.api_key)?;
        self.require("embedding_deployment", &self.embedding_deployment)
    }

    fn require(&self, field: &str, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "azure_openai.{} is not set (use config/local.toml or APP__AZURE_OPENAI__{})",
                field,
                field.to_uppercase()
            )));
        }
        Ok(())
    }
}

impl RagSettings {
    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.chunk_overlap)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.chunking().validate()?;

        if self.top_k == 0 {
            return Err(DomainError::configuration("rag.top_k must be greater than 0"));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Layer `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(Self::environment())
    }

    /// Same layering with an explicit environment source
    pub fn load_with(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }

    /// `APP__SECTION__KEY` variables, e.g. `APP__AZURE_OPENAI__API_KEY`
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}
