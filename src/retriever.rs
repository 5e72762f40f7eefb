//! Retrieval orchestration: build-or-open at startup, top-K lookup at
//! query time.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::chunking::Chunker;
use crate::document::SearchResult;
use crate::error::{RagError, Result};
use crate::index::EmbeddingIndex;
use crate::loader;

/// The seam between the retrieval core and answer generation.
///
/// At startup the retriever decides whether to attach to an existing
/// collection or build a fresh one from a document directory; afterwards it
/// serves [`retrieve`](Retriever::retrieve) calls.
pub struct Retriever {
    index: Arc<EmbeddingIndex>,
    chunker: Arc<dyn Chunker>,
}

impl Retriever {
    /// Create a retriever over the given index and chunking strategy.
    pub fn new(index: Arc<EmbeddingIndex>, chunker: Arc<dyn Chunker>) -> Self {
        Self { index, chunker }
    }

    /// Make the index ready: open the persisted collection if it exists,
    /// otherwise build it from the documents in `data_dir`.
    pub async fn initialize(&self, data_dir: impl AsRef<Path>) -> Result<()> {
        if self.index.collection_exists().await {
            self.index.open().await
        } else {
            info!(collection = self.index.collection(), "no persisted collection, building");
            self.rebuild(data_dir).await.map(|_| ())
        }
    }

    /// Load `data_dir`, chunk every document, and rebuild the collection
    /// from scratch. Returns the number of chunks indexed.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyInput`] if the directory yields no
    /// documents or no chunks — an empty index is never built silently.
    pub async fn rebuild(&self, data_dir: impl AsRef<Path>) -> Result<usize> {
        let data_dir = data_dir.as_ref();
        let documents = loader::load_from_directory(data_dir)?;
        if documents.is_empty() {
            return Err(RagError::EmptyInput);
        }

        let chunks = self.chunker.split(&documents);
        info!(
            document_count = documents.len(),
            chunk_count = chunks.len(),
            "chunked document set"
        );

        self.index.build(&chunks).await?;
        Ok(chunks.len())
    }

    /// Return the `k` chunks most similar to `query`, best first.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        self.index.search(query, k).await
    }
}
