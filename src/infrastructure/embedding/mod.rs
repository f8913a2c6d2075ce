//! Embedding provider implementations

mod azure_openai;
mod factory;
mod hashing;

pub use azure_openai::AzureOpenAiEmbeddingProvider;
pub use factory::EmbeddingProviderFactory;
pub use hashing::{DEFAULT_HASHING_DIMENSIONS, HASHING_MODEL, HashingEmbeddingProvider};

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
