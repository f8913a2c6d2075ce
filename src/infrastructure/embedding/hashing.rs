//! Local feature-hashing embeddings
//!
//! Words are lowercased, split on non-alphanumeric characters, counted and
//! hashed into a fixed number of buckets. The result is L2-normalised so
//! cosine similarity reduces to a dot product. No network access is needed.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;

pub const HASHING_MODEL: &str = "feature-hashing";
pub const DEFAULT_HASHING_DIMENSIONS: usize = 256;

/// djb2 over the UTF-8 bytes, computed in 64 bits so buckets do not depend
/// on the target's pointer width.
fn djb2(s: &str) -> u64 {
    let mut hash: u64 = 5381;
    for b in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u64::from(b));
    }
    hash
}

fn bucket(term: &str, dimensions: usize) -> usize {
    (djb2(term) % dimensions as u64) as usize
}

#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Hashing embedding dimensions must be greater than 0",
            ));
        }
        Ok(Self { dimensions })
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        let lowered = text.to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            *counts.entry(word).or_insert(0) += 1;
        }

        for (term, count) in counts {
            vector[bucket(term, self.dimensions)] += count as f32;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_HASHING_DIMENSIONS,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let embeddings = request
            .inputs()
            .iter()
            .enumerate()
            .map(|(index, text)| Embedding::new(index, self.embed_text(text)))
            .collect();

        Ok(EmbeddingResponse::new(
            request.model().to_string(),
            embeddings,
            EmbeddingUsage::default(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn default_model(&self) -> &str {
        HASHING_MODEL
    }

    fn dimensions(&self, _model: &str) -> Option<usize> {
        Some(self.dimensions)
    }
}
