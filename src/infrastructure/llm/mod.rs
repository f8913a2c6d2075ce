//! LLM provider implementations

mod azure_openai;
mod factory;
mod http_client;

pub use azure_openai::{AzureOpenAiConfig, AzureOpenAiProvider, DEFAULT_AZURE_API_VERSION};
pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
