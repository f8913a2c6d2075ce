//! RAG command - answers the example questions per knowledge base

use clap::Args;
use tracing::info;

use crate::config::EmbeddingProviderKind;
use crate::domain::{create_knowledge_base, questions_for, KnowledgeBaseTopic};
use crate::infrastructure::rag::RagPipelineBuilder;

/// Arguments for the RAG command
#[derive(Args, Clone, Debug)]
pub struct RagArgs {
    /// Only run one knowledge base (company, product or legal)
    #[arg(long)]
    pub topic: Option<KnowledgeBaseTopic>,

    /// Skip the scenario and use-case tables
    #[arg(long)]
    pub skip_tables: bool,
}

/// Run the RAG example
pub async fn run(args: RagArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    config.azure_openai.validate_chat()?;
    if config.embedding.provider == EmbeddingProviderKind::AzureOpenAi {
        config.azure_openai.validate_embeddings()?;
    }

    let builder = RagPipelineBuilder::from_config(&config)?;

    let mut knowledge_base = create_knowledge_base();
    if let Some(topic) = args.topic {
        knowledge_base.retain(|t, _| *t == topic);
    }

    println!("🔍 RAG Usage Examples");
    println!("{}", "=".repeat(50));

    for (topic, sentences) in &knowledge_base {
        println!("\n📚 {} KNOWLEDGE BASE", topic.as_str().to_uppercase());
        println!("{}", "-".repeat(40));

        let topic_chain = builder.build(*topic, sentences).await?;
        info!(topic = %topic, chunks = topic_chain.chunks, "Knowledge base ready");

        for question in questions_for(*topic) {
            println!("\n❓ Question: {}", question);
            let answer = topic_chain.chain.invoke(question).await?;
            println!("🤖 Answer: {}", answer);
        }
    }

    if !args.skip_tables {
        super::scenarios::print_scenarios();
        super::scenarios::print_use_cases();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Command};

    #[test]
    fn test_parse_topic() {
        let cli = Cli::parse_from(["llm-rag-examples", "rag", "--topic", "Legal"]);

        match cli.command {
            Command::Rag(args) => {
                assert_eq!(args.topic, Some(KnowledgeBaseTopic::Legal));
                assert!(!args.skip_tables);
            }
            _ => panic!("expected rag command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_topic() {
        assert!(Cli::try_parse_from(["llm-rag-examples", "rag", "--topic", "sales"]).is_err());
    }

    #[test]
    fn test_parse_subcommands() {
        assert!(matches!(
            Cli::parse_from(["llm-rag-examples", "chat"]).command,
            Command::Chat
        ));
        assert!(matches!(
            Cli::parse_from(["llm-rag-examples", "scenarios"]).command,
            Command::Scenarios
        ));
    }
}
