//! Domain layer - Core types, traits and the example flows

pub mod chain;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;
pub mod prompt;
pub mod showcase;

pub use chain::{format_documents, OutputParser, RagAnswer, RagChain, StrOutputParser};
pub use conversation::{ConversationDriver, Exchange, CONVERSATION_PROMPTS};
pub use embedding::{
    cosine_similarity, Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest,
    EmbeddingResponse, EmbeddingUsage,
};
pub use error::DomainError;
pub use ingestion::{split_documents, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
pub use knowledge_base::{
    create_knowledge_base, questions_for, AddDocumentsResult, Document, KnowledgeBase,
    KnowledgeBaseTopic, Retriever, SearchParams, SearchResult, VectorStore, VectorStoreRetriever,
};
pub use llm::{
    ChatModel, FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message,
    MessageRole, Usage,
};
pub use prompt::{PromptTemplate, TemplateError, RAG_PROMPT_TEMPLATE};
pub use showcase::{rag_use_cases, real_world_scenarios, Scenario, UseCase};
