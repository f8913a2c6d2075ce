//! RAG pipeline assembly

mod pipeline;

pub use pipeline::{RagPipelineBuilder, TopicChain};
