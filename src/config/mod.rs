//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, AzureOpenAiSettings, EmbeddingProviderKind, EmbeddingSettings, LogFormat,
    LoggingConfig, RagSettings,
};
