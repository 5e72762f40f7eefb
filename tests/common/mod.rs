//! Shared test fixtures: a deterministic embedding fake and chunk helpers.
#![allow(dead_code)]

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;
use medrag::{Chunk, EmbeddingProvider, Result};

/// Deterministic embedding provider for tests.
///
/// Hashes overlapping byte trigrams into a fixed-size vector and
/// L2-normalizes it, so identical texts always map to identical vectors
/// (self-similarity is maximal) and similar texts land near each other.
/// No network, no randomness.
pub struct HashEmbedder {
    dims: usize,
    model: String,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self::with_model(dims, "fake-hash-embedder")
    }

    pub fn with_model(dims: usize, model: &str) -> Self {
        Self { dims, model: model.to_string() }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dims];
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return v;
        }

        let window = bytes.len().min(3);
        for gram in bytes.windows(window) {
            let mut hasher = DefaultHasher::new();
            gram.hash(&mut hasher);
            v[(hasher.finish() as usize) % self.dims] += 1.0;
        }

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Build a chunk with an explicit embedding, for store-level tests.
pub fn embedded_chunk(id: &str, text: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        document_id: "doc".to_string(),
        sequence_index: 0,
        embedding,
    }
}

/// Build a chunk with no embedding, for index-level tests.
pub fn raw_chunk(document_id: &str, sequence_index: usize, text: &str) -> Chunk {
    Chunk {
        id: format!("{document_id}_{sequence_index}"),
        text: text.to_string(),
        document_id: document_id.to_string(),
        sequence_index,
        embedding: Vec::new(),
    }
}
