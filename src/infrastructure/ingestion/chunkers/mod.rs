//! Chunking strategy implementations

mod recursive;

pub use recursive::{DEFAULT_SEPARATORS, RecursiveCharacterSplitter};
