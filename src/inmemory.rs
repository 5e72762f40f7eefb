//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. Nothing survives the process; it exists for tests
//! and small experiments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, rank_by_similarity};

#[derive(Debug)]
struct StoredCollection {
    model_id: String,
    // Insertion order preserved; it is the search tie-break.
    chunks: Vec<Chunk>,
}

/// An in-memory vector store using cosine similarity for search.
///
/// # Example
///
/// ```rust,ignore
/// use medrag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.replace_collection("docs", "fake-model", &chunks).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, StoredCollection>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn replace_collection(
        &self,
        name: &str,
        model_id: &str,
        chunks: &[Chunk],
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.insert(
            name.to_string(),
            StoredCollection { model_id: model_id.to_string(), chunks: chunks.to_vec() },
        );
        Ok(())
    }

    async fn open_collection(&self, name: &str, expected_model: &str) -> Result<()> {
        let collections = self.collections.read().await;
        let stored = collections
            .get(name)
            .ok_or_else(|| RagError::CollectionNotFound(name.to_string()))?;
        if stored.model_id != expected_model {
            return Err(RagError::ModelMismatch {
                stored: stored.model_id.clone(),
                configured: expected_model.to_string(),
            });
        }
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> bool {
        self.collections.read().await.contains_key(name)
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let stored = collections
            .get(collection)
            .ok_or_else(|| RagError::CollectionNotFound(collection.to_string()))?;

        Ok(rank_by_similarity(&stored.chunks, embedding, top_k))
    }
}
