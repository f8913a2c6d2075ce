//! Knowledge bases, vector stores and retrieval

mod catalog;
mod entity;
mod provider;
mod retriever;

pub use catalog::{create_knowledge_base, questions_for, sentences_for, topic_documents, KnowledgeBase};
pub use entity::{KnowledgeBaseTopic, SearchResult};
pub use provider::{AddDocumentsResult, Document, SearchParams, VectorStore};
pub use retriever::{Retriever, VectorStoreRetriever};

#[cfg(test)]
pub use retriever::MockRetriever;
