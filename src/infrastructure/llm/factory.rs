use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::http_client::HttpClient;
use super::{AzureOpenAiConfig, AzureOpenAiProvider};
use crate::config::AzureOpenAiSettings;
use crate::domain::{ChatModel, DomainError, LlmProvider};

/// Factory for chat providers and models
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Build the Azure OpenAI provider described by the settings
    pub fn create_azure_openai(
        settings: &AzureOpenAiSettings,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let client = HttpClient::with_timeout(Duration::from_secs(settings.timeout_secs))?;
        let config = AzureOpenAiConfig::new(&settings.endpoint, &settings.api_key)
            .with_api_version(&settings.api_version);

        Ok(Arc::new(AzureOpenAiProvider::new(client, config)))
    }

    /// Build the chat model used by the examples.
    ///
    /// Binds the chat deployment, temperature and seed. Performs no network I/O.
    pub fn create_chat_model(settings: &AzureOpenAiSettings) -> Result<ChatModel, DomainError> {
        let provider = Self::create_azure_openai(settings)?;

        let mut model = ChatModel::new(provider, &settings.chat_deployment)
            .with_temperature(settings.temperature);

        if let Some(seed) = settings.seed {
            model = model.with_seed(seed);
        }

        debug!(deployment = %settings.chat_deployment, "Chat model created");

        Ok(model)
    }
}
