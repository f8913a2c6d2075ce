//! Builds one question-answering chain per knowledge base

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::ingestion::{split_documents, ChunkingConfig, ChunkingStrategy};
use crate::domain::knowledge_base::{
    topic_documents, KnowledgeBase, KnowledgeBaseTopic, VectorStore, VectorStoreRetriever,
};
use crate::domain::llm::ChatModel;
use crate::domain::{DomainError, RagChain};
use crate::infrastructure::embedding::EmbeddingProviderFactory;
use crate::infrastructure::ingestion::RecursiveCharacterSplitter;
use crate::infrastructure::knowledge_base::InMemoryVectorStore;
use crate::infrastructure::llm::LlmProviderFactory;

/// A ready-to-query chain over one knowledge base
#[derive(Debug)]
pub struct TopicChain {
    pub topic: KnowledgeBaseTopic,
    pub chain: RagChain,
    pub store: Arc<InMemoryVectorStore>,
    /// Number of chunks indexed
    pub chunks: usize,
}

/// Split → embed → index → chain, per knowledge base
#[derive(Debug, Clone)]
pub struct RagPipelineBuilder {
    model: ChatModel,
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    splitter: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
    top_k: usize,
}

impl RagPipelineBuilder {
    pub fn new(model: ChatModel, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let embedding_model = embedder.default_model().to_string();

        Self {
            model,
            embedder,
            embedding_model,
            splitter: Arc::new(RecursiveCharacterSplitter::new()),
            chunking: ChunkingConfig::default(),
            top_k: VectorStoreRetriever::DEFAULT_TOP_K,
        }
    }

    /// Wire chat model, embedder and chunking from configuration.
    /// No network calls are made here.
    pub fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        config.rag.validate()?;

        let model = LlmProviderFactory::create_chat_model(&config.azure_openai)?;
        let (embedder, embedding_model) =
            EmbeddingProviderFactory::create(&config.embedding, &config.azure_openai)?;

        Ok(Self::new(model, embedder)
            .with_embedding_model(embedding_model)
            .with_chunking(config.rag.chunking())
            .with_top_k(config.rag.top_k))
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_splitter(mut self, splitter: Arc<dyn ChunkingStrategy>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn chunking(&self) -> &ChunkingConfig {
        &self.chunking
    }

    /// Index a topic's sentences and return a chain over them
    pub async fn build(
        &self,
        topic: KnowledgeBaseTopic,
        sentences: &[&str],
    ) -> Result<TopicChain, DomainError> {
        if sentences.is_empty() {
            return Err(DomainError::validation(format!(
                "Knowledge base '{}' has no documents",
                topic
            )));
        }

        let documents = topic_documents(topic, sentences);
        let splits = split_documents(self.splitter.as_ref(), &documents, &self.chunking)?;

        let store = Arc::new(InMemoryVectorStore::with_model(
            self.embedder.clone(),
            &self.embedding_model,
        ));
        let added = store.add_documents(splits).await?.added;

        info!(
            topic = %topic,
            documents = documents.len(),
            chunks = added,
            splitter = self.splitter.name(),
            embedder = self.embedder.provider_name(),
            "Indexed knowledge base"
        );

        let retriever = VectorStoreRetriever::new(store.clone()).with_top_k(self.top_k);
        let chain = RagChain::new(Arc::new(retriever), self.model.clone())?;

        Ok(TopicChain {
            topic,
            chain,
            store,
            chunks: added,
        })
    }

    /// Build chains for every knowledge base, in topic order
    pub async fn build_all(&self, knowledge_base: &KnowledgeBase) -> Result<Vec<TopicChain>, DomainError> {
        let mut chains = Vec::with_capacity(knowledge_base.len());

        for (topic, sentences) in knowledge_base {
            chains.push(self.build(*topic, sentences).await?);
        }

        Ok(chains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmbeddingProviderKind, EmbeddingSettings};
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::ingestion::chunker::mock::PipeChunkingStrategy;
    use crate::domain::knowledge_base::{create_knowledge_base, sentences_for};
    use crate::domain::llm::MockLlmProvider;

    fn builder(provider: Arc<MockLlmProvider>) -> RagPipelineBuilder {
        let embedder = MockEmbeddingProvider::new(&["vacation", "remote", "health", "review"]);
        RagPipelineBuilder::new(ChatModel::new(provider, "gpt-4o"), Arc::new(embedder))
    }

    #[tokio::test]
    async fn test_build_indexes_every_sentence() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let builder = builder(provider);

        let topic_chain = builder
            .build(
                KnowledgeBaseTopic::Company,
                sentences_for(KnowledgeBaseTopic::Company),
            )
            .await
            .unwrap();

        // Every sentence fits in one chunk
        assert_eq!(topic_chain.chunks, 5);
        assert_eq!(topic_chain.store.document_count().await.unwrap(), 5);
        assert_eq!(topic_chain.store.model(), "mock-embedding");
    }

    #[tokio::test]
    async fn test_chain_answers_from_retrieved_context() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("Three days."));
        let builder = builder(provider.clone()).with_top_k(1);

        let topic_chain = builder
            .build(
                KnowledgeBaseTopic::Company,
                &["Vacation is 25 days.", "Remote work is allowed 3 days a week."],
            )
            .await
            .unwrap();

        let answer = topic_chain
            .chain
            .invoke("How many remote days are allowed?")
            .await
            .unwrap();

        assert_eq!(answer, "Three days.");

        let prompt = provider.requests()[0].1.messages[0].content().to_string();
        assert!(prompt.contains("Context: Remote work is allowed 3 days a week.\n\n"));
        assert!(!prompt.contains("Vacation is 25 days."));
    }

    #[tokio::test]
    async fn test_long_sentences_are_split() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let builder = builder(provider).with_chunking(ChunkingConfig::new(20, 5));

        let topic_chain = builder
            .build(
                KnowledgeBaseTopic::Legal,
                &["This agreement may be terminated with thirty days notice."],
            )
            .await
            .unwrap();

        assert!(topic_chain.chunks > 1);
    }

    #[tokio::test]
    async fn test_custom_splitter() {
        let provider = Arc::new(MockLlmProvider::new("mock"));
        let builder = builder(provider).with_splitter(Arc::new(PipeChunkingStrategy));

        let topic_chain = builder
            .build(KnowledgeBaseTopic::Product, &["a|b|c", "d"])
            .await
            .unwrap();

        assert_eq!(topic_chain.chunks, 4);
    }

    #[tokio::test]
    async fn test_empty_knowledge_base_rejected() {
        let provider = Arc::new(MockLlmProvider::new("mock"));

        let result = builder(provider)
            .build(KnowledgeBaseTopic::Product, &[])
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_build_all_in_topic_order() {
        let provider = Arc::new(MockLlmProvider::new("mock"));

        let chains = builder(provider)
            .build_all(&create_knowledge_base())
            .await
            .unwrap();

        let topics: Vec<KnowledgeBaseTopic> = chains.iter().map(|c| c.topic).collect();
        assert_eq!(topics, KnowledgeBaseTopic::ALL.to_vec());
    }

    #[test]
    fn test_from_config_needs_no_network() {
        let mut config = AppConfig::default();
        config.azure_openai.endpoint = "https://myresource.openai.azure.com".to_string();
        config.azure_openai.api_key = "key".to_string();
        config.azure_openai.chat_deployment = "gpt-4o".to_string();
        config.embedding = EmbeddingSettings {
            provider: EmbeddingProviderKind::Hashing,
            dimensions: 64,
        };
        config.rag.top_k = 2;

        let builder = RagPipelineBuilder::from_config(&config).unwrap();

        assert_eq!(builder.chunking(), &ChunkingConfig::new(100, 20));
        assert_eq!(builder.top_k, 2);
        assert_eq!(builder.embedding_model, "feature-hashing");
    }

    #[test]
    fn test_from_config_rejects_bad_chunking() {
        let mut config = AppConfig::default();
        config.rag.chunk_overlap = 100;

        assert!(RagPipelineBuilder::from_config(&config).is_err());
    }
}
