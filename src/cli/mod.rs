//! CLI module for the LLM and RAG examples
//!
//! Provides one subcommand per example:
//! - `chat`: send a few prompts straight to the chat model
//! - `rag`: answer questions over the built-in knowledge bases
//! - `scenarios`: print the RAG scenario and use-case tables

pub mod chat;
pub mod rag;
pub mod scenarios;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// LLM and RAG usage examples against Azure OpenAI
#[derive(Parser)]
#[command(name = "llm-rag-examples")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the direct chat example
    Chat,

    /// Run the RAG example over the built-in knowledge bases
    Rag(rag::RagArgs),

    /// Print real-world RAG scenarios and use cases
    Scenarios,
}

/// Load `.env`, the layered configuration and the log subscriber
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    Ok(config)
}
