use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::provider::Document;
use crate::domain::DomainError;

/// Topic a knowledge base covers. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnowledgeBaseTopic {
    Company,
    Product,
    Legal,
}

impl KnowledgeBaseTopic {
    pub const ALL: [KnowledgeBaseTopic; 3] = [
        KnowledgeBaseTopic::Company,
        KnowledgeBaseTopic::Product,
        KnowledgeBaseTopic::Legal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeBaseTopic::Company => "company",
            KnowledgeBaseTopic::Product => "product",
            KnowledgeBaseTopic::Legal => "legal",
        }
    }
}

impl fmt::Display for KnowledgeBaseTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnowledgeBaseTopic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("Unknown knowledge base topic: {}", s)))
    }
}

/// A vector search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub content: String,
    /// Cosine similarity, higher is closer
    pub score: f32,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: HashMap::new(),
            source: None,
        }
    }

    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Drop the score and turn the hit back into a document
    pub fn into_document(self) -> Document {
        let document = Document::new(self.id, self.content).with_all_metadata(self.metadata);

        match self.source {
            Some(source) => document.with_source(source),
            None => document,
        }
    }
}
