//! Vector store trait for storing and searching embedded chunks.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for embedded chunks with similarity search.
///
/// Implementations manage named collections. A collection is written as a
/// whole (`replace_collection` is a full rebuild, never a merge) and read
/// either by attaching to existing data (`open_collection`) or by searching.
///
/// Stored chunks keep their insertion order, which is the documented
/// tie-break for equally-similar search results.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Replace the named collection with the given chunks, recording the
    /// embedding model they were produced with. Creates the collection if
    /// it does not exist. Chunks must have embeddings set.
    async fn replace_collection(&self, name: &str, model_id: &str, chunks: &[Chunk])
        -> Result<()>;

    /// Attach to an existing collection without re-embedding.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionNotFound`](crate::RagError::CollectionNotFound)
    /// if no such collection exists, or
    /// [`RagError::ModelMismatch`](crate::RagError::ModelMismatch) if it was
    /// built with a different embedding model than `expected_model`.
    async fn open_collection(&self, name: &str, expected_model: &str) -> Result<()>;

    /// Whether the named collection exists in this store.
    async fn collection_exists(&self, name: &str) -> bool;

    /// Search for the `top_k` most similar chunks to the given embedding.
    ///
    /// Returns results ordered by descending cosine similarity; ties keep
    /// insertion order.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score every chunk against the query embedding and keep the best `top_k`.
///
/// The sort is stable, so chunks with equal scores come back in the order
/// they were inserted into the collection.
pub(crate) fn rank_by_similarity(
    chunks: &[Chunk],
    embedding: &[f32],
    top_k: usize,
) -> Vec<SearchResult> {
    let mut scored: Vec<SearchResult> = chunks
        .iter()
        .map(|chunk| SearchResult {
            score: cosine_similarity(&chunk.embedding, embedding),
            chunk: chunk.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}
