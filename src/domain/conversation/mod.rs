//! Direct chat usage: a fixed list of prompts, each sent on its own

use tracing::info;

use crate::domain::llm::ChatModel;
use crate::domain::DomainError;

/// Prompts sent by the conversation example
pub const CONVERSATION_PROMPTS: &[&str] = &[
    "Hello, how are you?",
    "What's the weather like today in Bangalore?",
    "Tell me a joke",
];

/// One prompt and the model's reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub prompt: String,
    pub reply: String,
}

/// Sends each prompt as an independent single-message request.
///
/// No history is carried between prompts.
#[derive(Debug, Clone)]
pub struct ConversationDriver {
    model: ChatModel,
    prompts: Vec<String>,
}

impl ConversationDriver {
    pub fn new(model: ChatModel) -> Self {
        Self::with_prompts(model, CONVERSATION_PROMPTS.iter().map(|p| p.to_string()))
    }

    pub fn with_prompts(model: ChatModel, prompts: impl IntoIterator<Item = String>) -> Self {
        Self {
            model,
            prompts: prompts.into_iter().collect(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Run every prompt, invoking `on_exchange` as each reply arrives.
    ///
    /// Stops at the first failed call.
    pub async fn run_with<F>(&self, mut on_exchange: F) -> Result<Vec<Exchange>, DomainError>
    where
        F: FnMut(&Exchange),
    {
        if self.prompts.is_empty() {
            return Err(DomainError::validation("conversation has no prompts"));
        }

        let mut exchanges = Vec::with_capacity(self.prompts.len());

        for prompt in &self.prompts {
            info!(deployment = %self.model.deployment(), "Sending conversation prompt");

            let response = self.model.invoke(prompt).await?;
            let exchange = Exchange {
                prompt: prompt.clone(),
                reply: response.content().to_string(),
            };

            on_exchange(&exchange);
            exchanges.push(exchange);
        }

        Ok(exchanges)
    }

    pub async fn run(&self) -> Result<Vec<Exchange>, DomainError> {
        self.run_with(|_| {}).await
    }
}
