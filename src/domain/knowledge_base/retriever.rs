//! Query-to-documents retrieval

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::provider::{Document, SearchParams, VectorStore};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Fetches the documents relevant to a query
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>, DomainError>;
}

/// Retriever backed by a vector store similarity search
#[derive(Debug, Clone)]
pub struct VectorStoreRetriever {
    store: Arc<dyn VectorStore>,
    top_k: usize,
    similarity_threshold: Option<f32>,
}

impl VectorStoreRetriever {
    pub const DEFAULT_TOP_K: usize = 4;

    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            top_k: Self::DEFAULT_TOP_K,
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

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>, DomainError> {
        let mut params = SearchParams::new(query).with_top_k(self.top_k);

        if let Some(threshold) = self.similarity_threshold {
            params = params.with_similarity_threshold(threshold);
        }

        let results = self.store.similarity_search(params).await?;

        debug!(
            store = self.store.store_type(),
            hits = results.len(),
            "Retrieved documents"
        );

        Ok(results.into_iter().map(|r| r.into_document()).collect())
    }
}
