//! Vector store trait and its request types

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::SearchResult;
use crate::domain::error::DomainError;

/// Text plus metadata, the unit indexed by a vector store
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    /// Page content
    pub content: String,
    pub metadata: HashMap<String, serde_json::Value>,
    pub source: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
            source: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Similarity search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    /// Maximum number of hits
    pub top_k: usize,
    /// Hits scoring below this are dropped
    pub similarity_threshold: Option<f32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: 4,
            similarity_threshold: None,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }
}

/// Result of adding documents to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDocumentsResult {
    pub added: usize,
    pub ids: Vec<String>,
}

impl AddDocumentsResult {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            added: ids.len(),
            ids,
        }
    }
}

/// Nearest-neighbour index over document embeddings
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    fn store_type(&self) -> &'static str;

    /// Embed and index documents; re-adding an id replaces the entry
    async fn add_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<AddDocumentsResult, DomainError>;

    /// Embed the query and return the closest documents, best first
    async fn similarity_search(&self, params: SearchParams)
        -> Result<Vec<SearchResult>, DomainError>;

    async fn document_count(&self) -> Result<usize, DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;
}
