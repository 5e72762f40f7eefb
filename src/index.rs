//! The embedding index: build, open, and search a named collection.
//!
//! [`EmbeddingIndex`] pairs an [`EmbeddingProvider`] with a [`VectorStore`]
//! and enforces the collection lifecycle: a collection must be built (embed
//! and persist) or opened (attach to persisted data) before it can be
//! searched. `build` is always a full replacement of the collection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use crate::document::{Chunk, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// An index over one named collection.
///
/// Searching before [`build`](EmbeddingIndex::build) or
/// [`open`](EmbeddingIndex::open) is a sequencing error and fails with
/// [`RagError::NotInitialized`] rather than returning empty results.
pub struct EmbeddingIndex {
    provider: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
    ready: AtomicBool,
}

impl EmbeddingIndex {
    /// Create an index over the named collection. The index starts
    /// uninitialized; call [`build`](EmbeddingIndex::build) or
    /// [`open`](EmbeddingIndex::open) before searching.
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self { provider, store, collection: collection.into(), ready: AtomicBool::new(false) }
    }

    /// The collection name this index reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Whether the underlying store already holds this collection.
    pub async fn collection_exists(&self) -> bool {
        self.store.collection_exists(&self.collection).await
    }

    /// Embed the given chunks and replace the collection with them.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyInput`] if `chunks` is empty — an empty
    /// index is never silently created. Embedding failures surface as
    /// [`RagError::Embedding`].
    pub async fn build(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Err(RagError::EmptyInput);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.provider.embed_batch(&texts).await.map_err(|e| {
            error!(collection = %self.collection, error = %e, "embedding failed during build");
            e
        })?;

        let mut embedded = chunks.to_vec();
        for (chunk, embedding) in embedded.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.store
            .replace_collection(&self.collection, self.provider.model_id(), &embedded)
            .await?;

        info!(
            collection = %self.collection,
            chunk_count = embedded.len(),
            model = self.provider.model_id(),
            "built index"
        );

        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Attach to the persisted collection without re-embedding.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionNotFound`] if the collection has never
    /// been built, or [`RagError::ModelMismatch`] if it was built with a
    /// different embedding model than the configured provider.
    pub async fn open(&self) -> Result<()> {
        self.store.open_collection(&self.collection, self.provider.model_id()).await?;
        info!(collection = %self.collection, "opened existing index");
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Embed `query` and return the `k` most similar chunks, best first.
    ///
    /// Results are ordered by descending cosine similarity; equally-similar
    /// chunks keep the order they were indexed in. At most `k` results are
    /// returned, fewer only when the collection holds fewer chunks.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::NotInitialized`] before `build`/`open`, and
    /// [`RagError::Config`] for `k == 0`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        if !self.ready.load(Ordering::SeqCst) {
            return Err(RagError::NotInitialized);
        }
        if k == 0 {
            return Err(RagError::Config("search k must be greater than zero".to_string()));
        }

        let query_embedding = self.provider.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            e
        })?;

        self.store.search(&self.collection, &query_embedding, k).await
    }
}
