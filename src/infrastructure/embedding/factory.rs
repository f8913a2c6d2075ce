//! Embedding provider factory

use std::sync::Arc;
use std::time::Duration;

use super::{AzureOpenAiEmbeddingProvider, HashingEmbeddingProvider, HttpClient};
use crate::config::{AzureOpenAiSettings, EmbeddingProviderKind, EmbeddingSettings};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::llm::AzureOpenAiConfig;

/// Factory for creating embedding providers from configuration
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Create the configured provider. Returns the provider together with
    /// the model name to pass in requests.
    pub fn create(
        embedding: &EmbeddingSettings,
        azure: &AzureOpenAiSettings,
    ) -> Result<(Arc<dyn EmbeddingProvider>, String), DomainError> {
        match embedding.provider {
            EmbeddingProviderKind::AzureOpenAi => {
                let provider = Self::create_azure_openai(azure)?;
                Ok((provider, azure.embedding_deployment.clone()))
            }
            EmbeddingProviderKind::Hashing => {
                let provider = HashingEmbeddingProvider::new(embedding.dimensions)?;
                let model = provider.default_model().to_string();
                Ok((Arc::new(provider), model))
            }
        }
    }

    pub fn create_azure_openai(
        settings: &AzureOpenAiSettings,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        let config = AzureOpenAiConfig::new(&settings.endpoint, &settings.api_key)
            .with_api_version(&settings.api_version);

        Ok(Arc::new(AzureOpenAiEmbeddingProvider::new(
            client,
            config,
            &settings.embedding_deployment,
        )))
    }
}
