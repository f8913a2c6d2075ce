//! Chat command - sends each example prompt to the chat model

use tracing::info;

use crate::domain::ConversationDriver;
use crate::infrastructure::llm::LlmProviderFactory;

/// Run the direct chat example
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    config.azure_openai.validate_chat()?;

    let model = LlmProviderFactory::create_chat_model(&config.azure_openai)?;
    info!(deployment = %model.deployment(), "Starting conversation");

    let driver = ConversationDriver::new(model);
    driver
        .run_with(|exchange| {
            println!("\n User: {}", exchange.prompt);
            println!(" Assistant: {}", exchange.reply);
        })
        .await?;

    Ok(())
}
