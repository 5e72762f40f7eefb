//! Durable vector store persisting one JSON file per collection.
//!
//! [`JsonFileVectorStore`] writes a collection as a single serialized file
//! under a root directory, `{root}/{collection}.json`. Writes go to a
//! temporary file first and are renamed into place, so a crashed rebuild
//! never leaves a half-written collection behind. The embedding model
//! identifier is stored with the data and checked when the collection is
//! opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, rank_by_similarity};

/// On-disk layout of one collection file.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCollection {
    collection: String,
    /// Model that produced every embedding in `records`. Mixing models in
    /// one collection corrupts ranking, so this is validated on open.
    embedding_model: String,
    /// Chunks in insertion order, embeddings included.
    records: Vec<Chunk>,
}

/// A file-backed vector store with an in-process read cache.
///
/// Collections are loaded fully into memory for search; the file is the
/// durable source of truth. Concurrent rebuild and search of the same
/// collection from different processes is not coordinated here and must be
/// serialized by the caller.
#[derive(Debug)]
pub struct JsonFileVectorStore {
    root: PathBuf,
    cache: RwLock<HashMap<String, PersistedCollection>>,
}

impl JsonFileVectorStore {
    /// Create a store rooted at the given directory. The directory is
    /// created on first write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), cache: RwLock::new(HashMap::new()) }
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    fn store_error(&self, message: impl Into<String>) -> RagError {
        RagError::Store { backend: "JsonFile".to_string(), message: message.into() }
    }

    async fn read_from_disk(&self, name: &str) -> Result<PersistedCollection> {
        let path = self.collection_path(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RagError::CollectionNotFound(name.to_string())
            } else {
                self.store_error(format!("failed to read {}: {e}", path.display()))
            }
        })?;

        let persisted: PersistedCollection = serde_json::from_slice(&bytes).map_err(|e| {
            self.store_error(format!("failed to parse {}: {e}", path.display()))
        })?;

        debug!(collection = name, chunk_count = persisted.records.len(), "loaded collection");
        Ok(persisted)
    }

    /// Make sure the named collection is in the cache, loading it from disk
    /// if needed.
    async fn ensure_loaded(&self, name: &str) -> Result<()> {
        if self.cache.read().await.contains_key(name) {
            return Ok(());
        }
        let persisted = self.read_from_disk(name).await?;
        self.cache.write().await.insert(name.to_string(), persisted);
        Ok(())
    }

    async fn write_to_disk(&self, persisted: &PersistedCollection) -> Result<()> {
        let path = self.collection_path(&persisted.collection);
        let tmp = path.with_extension("json.tmp");

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                self.store_error(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let bytes = serde_json::to_vec(persisted)
            .map_err(|e| self.store_error(format!("failed to serialize collection: {e}")))?;

        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            self.store_error(format!("failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            self.store_error(format!("failed to replace {}: {e}", path.display()))
        })?;

        Ok(())
    }

    /// The directory this store persists collections under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl VectorStore for JsonFileVectorStore {
    async fn replace_collection(
        &self,
        name: &str,
        model_id: &str,
        chunks: &[Chunk],
    ) -> Result<()> {
        let persisted = PersistedCollection {
            collection: name.to_string(),
            embedding_model: model_id.to_string(),
            records: chunks.to_vec(),
        };

        self.write_to_disk(&persisted).await?;
        info!(collection = name, chunk_count = chunks.len(), "persisted collection");

        self.cache.write().await.insert(name.to_string(), persisted);
        Ok(())
    }

    async fn open_collection(&self, name: &str, expected_model: &str) -> Result<()> {
        self.ensure_loaded(name).await?;

        let cache = self.cache.read().await;
        // Present by construction after ensure_loaded.
        let stored = cache.get(name).ok_or_else(|| {
            RagError::CollectionNotFound(name.to_string())
        })?;

        if stored.embedding_model != expected_model {
            return Err(RagError::ModelMismatch {
                stored: stored.embedding_model.clone(),
                configured: expected_model.to_string(),
            });
        }
        Ok(())
    }

    async fn collection_exists(&self, name: &str) -> bool {
        if self.cache.read().await.contains_key(name) {
            return true;
        }
        self.collection_path(name).is_file()
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        self.ensure_loaded(collection).await?;

        let cache = self.cache.read().await;
        let stored = cache
            .get(collection)
            .ok_or_else(|| RagError::CollectionNotFound(collection.to_string()))?;

        Ok(rank_by_similarity(&stored.records, embedding, top_k))
    }
}
