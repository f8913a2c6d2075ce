//! LLM and RAG usage examples
//!
//! Shows two ways of working with an Azure OpenAI chat deployment:
//! - Direct chat calls, one prompt at a time
//! - Retrieval-augmented generation over small in-memory knowledge bases
//!   (split → embed → index → retrieve → prompt → answer)

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
