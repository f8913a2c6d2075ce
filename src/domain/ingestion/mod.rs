//! Document chunking domain types and traits

pub mod chunker;

pub use chunker::{split_documents, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
