//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::knowledge_base::Document;
use crate::domain::DomainError;

/// Configuration for chunking, measured in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk length
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 20,
        }
    }
}

/// Position of a chunk within its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub chunk_index: usize,
    pub total_chunks: usize,
    /// Character offset where this chunk starts
    pub char_start: usize,
    /// Character offset one past the chunk's last character
    pub char_end: usize,
}

impl ChunkMetadata {
    pub fn new(chunk_index: usize, total_chunks: usize, char_start: usize, char_end: usize) -> Self {
        Self {
            chunk_index,
            total_chunks,
            char_start,
            char_end,
        }
    }
}

/// A chunk of text extracted from a document
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into chunks
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError>;

    fn name(&self) -> &'static str;
}

/// Split every document into chunk documents.
///
/// Chunks inherit the parent's metadata and source, and gain `parent_id`,
/// `chunk_index`, `char_start` and `char_end` metadata entries.
pub fn split_documents(
    strategy: &dyn ChunkingStrategy,
    documents: &[Document],
    config: &ChunkingConfig,
) -> Result<Vec<Document>, DomainError> {
    let mut splits = Vec::new();

    for document in documents {
        for chunk in strategy.chunk(&document.content, config)? {
            let mut split = Document::new(
                format!("{}-{}", document.id, chunk.index()),
                chunk.content,
            )
            .with_all_metadata(document.metadata.clone())
            .with_metadata("parent_id", serde_json::json!(document.id))
            .with_metadata("chunk_index", serde_json::json!(chunk.metadata.chunk_index))
            .with_metadata("char_start", serde_json::json!(chunk.metadata.char_start))
            .with_metadata("char_end", serde_json::json!(chunk.metadata.char_end));

            if let Some(source) = &document.source {
                split = split.with_source(source);
            }

            splits.push(split);
        }
    }

    Ok(splits)
}


#[cfg(test)]
mod tests {
    use super::*;
    use mock::PipeChunkingStrategy;

    #[test]
    fn test_chunking_config_default() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.chunk_overlap, 20);
    }

    #[test]
    fn test_chunking_config_validation() {
        assert!(ChunkingConfig::new(100, 20).validate().is_ok());
        assert!(ChunkingConfig::new(0, 0).validate().is_err());
        assert!(ChunkingConfig::new(100, 100).validate().is_err());
    }

    #[test]
    fn test_chunk_len_counts_characters() {
        let chunk = Chunk::new("héllo", ChunkMetadata::new(0, 1, 0, 5));
        assert_eq!(chunk.len(), 5);
    }

    #[test]
    fn test_split_documents_carries_metadata() {
        let documents = vec![
            Document::new("company-0", "a|b")
                .with_metadata("topic", serde_json::json!("company"))
                .with_source("handbook"),
            Document::new("company-1", "c"),
        ];

        let splits =
            split_documents(&PipeChunkingStrategy, &documents, &ChunkingConfig::default()).unwrap();

        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0].id, "company-0-0");
        assert_eq!(splits[1].id, "company-0-1");
        assert_eq!(splits[2].id, "company-1-0");

        assert_eq!(splits[1].content, "b");
        assert_eq!(splits[1].metadata.get("topic"), Some(&serde_json::json!("company")));
        assert_eq!(splits[1].metadata.get("parent_id"), Some(&serde_json::json!("company-0")));
        assert_eq!(splits[1].metadata.get("chunk_index"), Some(&serde_json::json!(1)));
        assert_eq!(splits[1].source.as_deref(), Some("handbook"));
        assert!(splits[2].source.is_none());
    }

    #[test]
    fn test_split_documents_rejects_invalid_config() {
        let documents = vec![Document::new("d", "text")];
        let result = split_documents(&PipeChunkingStrategy, &documents, &ChunkingConfig::new(10, 10));

        assert!(result.is_err());
    }
}
