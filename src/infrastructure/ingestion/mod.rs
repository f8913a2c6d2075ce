//! Document ingestion infrastructure

pub mod chunkers;

pub use chunkers::RecursiveCharacterSplitter;
