//! A provider bound to one deployment with default sampling options

use std::sync::Arc;

use tracing::debug;

use super::{LlmProvider, LlmRequest, LlmResponse, Message};
use crate::domain::DomainError;

/// Chat model handle: provider + deployment + default sampling parameters.
///
/// Building one performs no I/O; the first network call happens on `invoke`.
#[derive(Debug, Clone)]
pub struct ChatModel {
    provider: Arc<dyn LlmProvider>,
    deployment: String,
    temperature: Option<f32>,
    seed: Option<u64>,
}

impl ChatModel {
    pub fn new(provider: Arc<dyn LlmProvider>, deployment: impl Into<String>) -> Self {
        Self {
            provider,
            deployment: deployment.into(),
            temperature: None,
            seed: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Send a single user message
    pub async fn invoke(&self, prompt: &str) -> Result<LlmResponse, DomainError> {
        self.invoke_messages(vec![Message::user(prompt)]).await
    }

    /// Send an arbitrary message list
    pub async fn invoke_messages(
        &self,
        messages: Vec<Message>,
    ) -> Result<LlmResponse, DomainError> {
        self.send(LlmRequest::new(messages)).await
    }

    /// Send a prepared request; model defaults fill only unset options
    pub async fn send(&self, mut request: LlmRequest) -> Result<LlmResponse, DomainError> {
        if request.messages.is_empty() {
            return Err(DomainError::validation("at least one message is required"));
        }

        if request.temperature.is_none() {
            request.temperature = self.temperature;
        }

        if request.seed.is_none() {
            request.seed = self.seed;
        }

        debug!(
            deployment = %self.deployment,
            messages = request.messages.len(),
            "Sending chat completion"
        );

        self.provider.chat(&self.deployment, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_invoke_applies_defaults() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("Hi!"));
        let model = ChatModel::new(provider.clone(), "gpt-4o")
            .with_temperature(0.5)
            .with_seed(50);

        let response = model.invoke("Hello").await.unwrap();
        assert_eq!(response.content(), "Hi!");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);

        let (deployment, request) = &requests[0];
        assert_eq!(deployment, "gpt-4o");
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.seed, Some(50));
        assert_eq!(request.messages, vec![Message::user("Hello")]);
    }

    #[tokio::test]
    async fn test_request_options_override_defaults() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let model = ChatModel::new(provider.clone(), "gpt-4o").with_temperature(0.5);

        let request = LlmRequest::builder().user("Hello").temperature(0.0).build();
        model.send(request).await.unwrap();

        let (_, sent) = &provider.requests()[0];
        assert_eq!(sent.temperature, Some(0.0));
        assert_eq!(sent.seed, None);
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let model = ChatModel::new(provider.clone(), "gpt-4o");

        let result = model.invoke_messages(vec![]).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("rate limited"));
        let model = ChatModel::new(provider, "gpt-4o");

        let err = model.invoke("Hello").await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }
}
