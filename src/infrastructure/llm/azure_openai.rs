use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage,
};

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI resource configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// `{endpoint}/openai/deployments/{deployment}/{operation}?api-version=...`
    pub fn deployment_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.endpoint.trim_end_matches('/'),
            deployment,
            operation,
            self.api_version
        )
    }

    pub fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

/// Azure OpenAI chat-completions provider
#[derive(Debug)]
pub struct AzureOpenAiProvider<C: HttpClientTrait> {
    client: C,
    config: AzureOpenAiConfig,
}

impl<C: HttpClientTrait> AzureOpenAiProvider<C> {
    pub fn new(client: C, config: AzureOpenAiConfig) -> Self {
        Self { client, config }
    }

    fn build_url(&self, deployment: &str) -> String {
        self.config.deployment_url(deployment, "chat/completions")
    }

    fn build_request(&self, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<AzureMessage> =
            request.messages.iter().map(AzureMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "messages": messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        if let Some(ref stop) = request.stop {
            body["stop"] = serde_json::json!(stop);
        }

        if let Some(seed) = request.seed {
            body["seed"] = serde_json::json!(seed);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: AzureResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("azure_openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("azure_openai", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::from_wire(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for AzureOpenAiProvider<C> {
    async fn chat(
        &self,
        deployment: &str,
        request: LlmRequest,
    ) -> Result<LlmResponse, DomainError> {
        let url = self.build_url(deployment);
        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&url, self.config.headers(), &body)
            .await?;

        let response = self.parse_response(response)?;

        debug!(
            deployment,
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0),
            "Chat completion received"
        );

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "azure_openai"
    }
}

// Azure OpenAI wire types

#[derive(Debug, Serialize)]
struct AzureMessage {
    role: &'static str,
    content: String,
}

impl AzureMessage {
    fn from_domain(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AzureResponse {
    id: String,
    model: String,
    choices: Vec<AzureChoice>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const CHAT_URL: &str = "https://myresource.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview";

    fn chat_response(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        })
    }

    #[tokio::test]
    async fn test_azure_openai_chat() {
        let client =
            MockHttpClient::new().with_response(CHAT_URL, chat_response("Hello from Azure!".into()));
        let config = AzureOpenAiConfig::new("https://myresource.openai.azure.com", "test-api-key");
        let provider = AzureOpenAiProvider::new(client, config);

        let request = LlmRequest::builder().user("Hello!").temperature(0.5).seed(50).build();
        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert_eq!(response.content(), "Hello from Azure!");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(15));

        let sent = &provider.client.requests()[0];
        assert_eq!(sent.body["messages"][0]["role"], "user");
        assert_eq!(sent.body["messages"][0]["content"], "Hello!");
        assert_eq!(sent.body["temperature"], 0.5);
        assert_eq!(sent.body["seed"], 50);
        assert!(sent.body.get("max_tokens").is_none());
        assert!(sent
            .headers
            .contains(&("api-key".to_string(), "test-api-key".to_string())));
    }

    #[tokio::test]
    async fn test_null_content_becomes_empty() {
        let client = MockHttpClient::new().with_response(CHAT_URL, chat_response(serde_json::Value::Null));
        let config = AzureOpenAiConfig::new("https://myresource.openai.azure.com", "key");
        let provider = AzureOpenAiProvider::new(client, config);

        let request = LlmRequest::builder().user("Hello!").build();
        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert_eq!(response.content(), "");
    }

    #[tokio::test]
    async fn test_no_choices_is_error() {
        let client = MockHttpClient::new().with_response(
            CHAT_URL,
            serde_json::json!({"id": "x", "model": "gpt-4o", "choices": []}),
        );
        let config = AzureOpenAiConfig::new("https://myresource.openai.azure.com", "key");
        let provider = AzureOpenAiProvider::new(client, config);

        let request = LlmRequest::builder().user("Hello!").build();
        let err = provider.chat("gpt-4o", request).await.unwrap_err();

        assert!(err.to_string().contains("No choices"));
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let client = MockHttpClient::new().with_error(CHAT_URL, "HTTP 401 Unauthorized");
        let config = AzureOpenAiConfig::new("https://myresource.openai.azure.com", "");
        let provider = AzureOpenAiProvider::new(client, config);

        let request = LlmRequest::builder().user("Hello!").build();
        let err = provider.chat("gpt-4o", request).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[test]
    fn test_url_building() {
        let config = AzureOpenAiConfig::new("https://myresource.openai.azure.com/", "key")
            .with_api_version("2024-06-01");
        let provider = AzureOpenAiProvider::new(MockHttpClient::new(), config);

        assert_eq!(
            provider.build_url("my-deployment"),
            "https://myresource.openai.azure.com/openai/deployments/my-deployment/chat/completions?api-version=2024-06-01"
        );
    }
}
