//! Retrieval QA chain and output parsers

mod output;
mod rag;

pub use output::{OutputParser, StrOutputParser};
pub use rag::{format_documents, RagAnswer, RagChain};
