//! In-memory vector store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest};
use crate::domain::knowledge_base::{
    AddDocumentsResult, Document, SearchParams, SearchResult, VectorStore,
};
use crate::domain::DomainError;

/// Vector store that keeps documents and their embeddings in memory and
/// scores them by cosine similarity
#[derive(Debug)]
pub struct InMemoryVectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    model: String,
    entries: RwLock<Vec<StoredDoc>>,
}

#[derive(Debug, Clone)]
struct StoredDoc {
    document: Document,
    embedding: Vec<f32>,
}

impl InMemoryVectorStore {
    /// Create an empty store embedding with the provider's default model
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let model = embedder.default_model().to_string();
        Self::with_model(embedder, model)
    }

    pub fn with_model(embedder: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            embedder,
            model: model.into(),
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let expected = texts.len();
        let response = self
            .embedder
            .embed(EmbeddingRequest::batch(&self.model, texts))
            .await?;
        let vectors = response.into_vectors();

        if vectors.len() != expected {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!("Expected {} embeddings, received {}", expected, vectors.len()),
            ));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_type(&self) -> &'static str {
        "in_memory"
    }

    async fn add_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<AddDocumentsResult, DomainError> {
        if documents.is_empty() {
            return Ok(AddDocumentsResult::new(Vec::new()));
        }

        let texts = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.embed_texts(texts).await?;

        let mut entries = self.entries.write().await;
        let mut ids = Vec::with_capacity(documents.len());

        for (mut document, embedding) in documents.into_iter().zip(vectors) {
            if document.id.is_empty() {
                document.id = Uuid::new_v4().to_string();
            }
            ids.push(document.id.clone());

            let stored = StoredDoc {
                document,
                embedding,
            };

            match entries
                .iter()
                .position(|e| e.document.id == stored.document.id)
            {
                Some(pos) => entries[pos] = stored,
                None => entries.push(stored),
            }
        }

        debug!(added = ids.len(), total = entries.len(), "Indexed documents");

        Ok(AddDocumentsResult::new(ids))
    }

    async fn similarity_search(
        &self,
        params: SearchParams,
    ) -> Result<Vec<SearchResult>, DomainError> {
        if params.top_k == 0 || self.entries.read().await.is_empty() {
            return Ok(Vec::new());
        }

        let query = self
            .embed_texts(vec![params.query.clone()])
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &StoredDoc)> = entries
            .iter()
            .map(|entry| (cosine_similarity(&query, &entry.embedding), entry))
            .filter(|(score, _)| {
                params
                    .similarity_threshold
                    .is_none_or(|threshold| *score >= threshold)
            })
            .collect();

        // Stable sort keeps insertion order for equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(params.top_k);

        let results = scored
            .into_iter()
            .map(|(score, entry)| {
                let doc = &entry.document;
                let mut result = SearchResult::new(&doc.id, &doc.content, score)
                    .with_all_metadata(doc.metadata.clone());

                if let Some(source) = &doc.source {
                    result = result.with_source(source);
                }

                result
            })
            .collect();

        Ok(results)
    }

    async fn document_count(&self) -> Result<usize, DomainError> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::knowledge_base::{Retriever, VectorStoreRetriever};

    fn store() -> InMemoryVectorStore {
        let embedder = MockEmbeddingProvider::new(&["vacation", "remote", "battery", "data"]);
        InMemoryVectorStore::new(Arc::new(embedder))
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::new("a", "Our vacation policy offers 20 days of vacation")
                .with_metadata("topic", serde_json::json!("company")),
            Document::new("b", "Remote work is allowed two days a week")
                .with_metadata("topic", serde_json::json!("company")),
            Document::new("c", "The smartwatch battery lasts two days")
                .with_metadata("topic", serde_json::json!("product"))
                .with_source("catalog"),
            Document::new("d", "We never sell customer data")
                .with_metadata("topic", serde_json::json!("legal")),
        ]
    }

    #[tokio::test]
    async fn test_add_and_count() {
        let store = store();

        let result = store.add_documents(documents()).await.unwrap();

        assert_eq!(result.added, 4);
        assert_eq!(result.ids, vec!["a", "b", "c", "d"]);
        assert_eq!(store.document_count().await.unwrap(), 4);
        assert_eq!(store.store_type(), "in_memory");
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let store = store();
        store.add_documents(documents()).await.unwrap();

        let results = store
            .similarity_search(SearchParams::new("How long does the battery last?").with_top_k(2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "c");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[0].source.as_deref(), Some("catalog"));
        assert_eq!(results[0].metadata["topic"], serde_json::json!("product"));
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = store();
        store.add_documents(documents()).await.unwrap();

        // Orthogonal to every document, so all score zero
        let results = store
            .similarity_search(SearchParams::new("unrelated question").with_top_k(3))
            .await
            .unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_similarity_threshold() {
        let store = store();
        store.add_documents(documents()).await.unwrap();

        let results = store
            .similarity_search(SearchParams::new("remote").with_similarity_threshold(0.5))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[tokio::test]
    async fn test_readding_replaces_entry() {
        let store = store();
        store.add_documents(documents()).await.unwrap();

        store
            .add_documents(vec![Document::new("a", "Remote only")])
            .await
            .unwrap();

        assert_eq!(store.document_count().await.unwrap(), 4);
        let results = store
            .similarity_search(SearchParams::new("remote").with_top_k(1))
            .await
            .unwrap();
        assert_eq!(results[0].id, "a");
        assert_eq!(results[0].content, "Remote only");
    }

    #[tokio::test]
    async fn test_empty_id_gets_generated() {
        let store = store();

        let result = store
            .add_documents(vec![Document::new("", "vacation")])
            .await
            .unwrap();

        assert_eq!(result.ids.len(), 1);
        assert!(Uuid::parse_str(&result.ids[0]).is_ok());
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let store = store();

        let results = store
            .similarity_search(SearchParams::new("vacation"))
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = store();
        store.add_documents(documents()).await.unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let embedder = MockEmbeddingProvider::new(&["x"]).with_error("quota exceeded");
        let store = InMemoryVectorStore::new(Arc::new(embedder));

        let err = store.add_documents(documents()).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
        assert_eq!(store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_retriever_over_store() {
        let store = store();
        store.add_documents(documents()).await.unwrap();
        let retriever = VectorStoreRetriever::new(Arc::new(store)).with_top_k(1);

        let docs = retriever.retrieve("Is remote work allowed?").await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b");
        assert_eq!(docs[0].metadata["topic"], serde_json::json!("company"));
    }

    #[tokio::test]
    async fn test_retriever_threshold() {
        let store = store();
        store.add_documents(documents()).await.unwrap();
        let retriever =
            VectorStoreRetriever::new(Arc::new(store)).with_similarity_threshold(0.99);

        let docs = retriever.retrieve("nothing matches").await.unwrap();

        assert!(docs.is_empty());
    }
}
