//! Azure OpenAI embeddings provider

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::llm::AzureOpenAiConfig;

/// Known embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Embeddings through an Azure deployment.
///
/// The request `model` names the deployment.
#[derive(Debug)]
pub struct AzureOpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    config: AzureOpenAiConfig,
    deployment: String,
}

impl<C: HttpClientTrait> AzureOpenAiEmbeddingProvider<C> {
    pub fn new(client: C, config: AzureOpenAiConfig, deployment: impl Into<String>) -> Self {
        Self {
            client,
            config,
            deployment: deployment.into(),
        }
    }

    fn embeddings_url(&self, deployment: &str) -> String {
        self.config.deployment_url(deployment, "embeddings")
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        let input = match request.input() {
            EmbeddingInput::Single(s) => serde_json::json!(s),
            EmbeddingInput::Batch(v) => serde_json::json!(v),
        };

        let mut body = serde_json::json!({ "input": input });

        if let Some(dims) = request.dimensions() {
            body["dimensions"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<EmbeddingResponse, DomainError> {
        let response: AzureEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(
                "azure_openai",
                format!("Failed to parse embedding response: {}", e),
            )
        })?;

        if response.data.len() != expected {
            return Err(DomainError::provider(
                "azure_openai",
                format!(
                    "Expected {} embeddings, received {}",
                    expected,
                    response.data.len()
                ),
            ));
        }

        let embeddings: Vec<Embedding> = response
            .data
            .into_iter()
            .map(|d| Embedding::new(d.index, d.embedding))
            .collect();

        let usage = response
            .usage
            .map(|u| EmbeddingUsage::new(u.prompt_tokens, u.total_tokens))
            .unwrap_or_default();

        Ok(EmbeddingResponse::new(response.model, embeddings, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for AzureOpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.input().is_empty() {
            return Ok(EmbeddingResponse::new(
                request.model().to_string(),
                Vec::new(),
                EmbeddingUsage::default(),
            ));
        }

        let url = self.embeddings_url(request.model());
        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&url, self.config.headers(), &body)
            .await?;

        self.parse_response(response, request.input().len())
    }

    fn provider_name(&self) -> &'static str {
        "azure_openai"
    }

    fn default_model(&self) -> &str {
        &self.deployment
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingResponse {
    #[serde(default)]
    model: String,
    data: Vec<AzureEmbeddingData>,
    usage: Option<AzureEmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}
