use clap::Parser;
use llm_rag_examples::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => cli::chat::run().await,
        Command::Rag(args) => cli::rag::run(args).await,
        Command::Scenarios => cli::scenarios::run().await,
    }
}
