//! Configuration for the retrieval pipeline.
//!
//! A [`RagConfig`] is constructed once at startup (from the environment or a
//! builder), validated, and passed by value to the components that need it.
//! Core logic never reads ambient state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
/// Default number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;
/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Default generation model identifier.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
/// Default root directory for persisted collections.
pub const DEFAULT_STORE_PATH: &str = "./vector_db";
/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "medical_documents";

/// Configuration parameters for the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of top results to return from vector search.
    pub top_k: usize,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Generation model identifier.
    pub llm_model: String,
    /// Root directory where collections are persisted.
    pub store_path: PathBuf,
    /// Name of the persisted collection.
    pub collection: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `EMBEDDING_MODEL`, `LLM_MODEL`, `CHUNK_SIZE`,
    /// `CHUNK_OVERLAP`, `TOP_K`, `VECTOR_DB_PATH`, `COLLECTION_NAME`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a numeric variable fails to parse or
    /// the resulting values are inconsistent.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            builder = builder.embedding_model(model);
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            builder = builder.llm_model(model);
        }
        if let Ok(path) = std::env::var("VECTOR_DB_PATH") {
            builder = builder.store_path(path);
        }
        if let Ok(name) = std::env::var("COLLECTION_NAME") {
            builder = builder.collection(name);
        }
        builder = builder
            .chunk_size(parse_env_usize("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?)
            .chunk_overlap(parse_env_usize("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?)
            .top_k(parse_env_usize("TOP_K", DEFAULT_TOP_K)?);

        builder.build()
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| RagError::Config(format!("{name} must be a non-negative integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of top results to return from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the generation model identifier.
    pub fn llm_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm_model = model.into();
        self
    }

    /// Set the root directory where collections are persisted.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RagConfig::builder().build().unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.chunk_overlap, DEFAULT_CHUNK_OVERLAP);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn overlap_must_be_less_than_chunk_size() {
        let err = RagConfig::builder().chunk_size(100).chunk_overlap(100).build().unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = RagConfig::builder().top_k(0).build().unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = RagConfig::builder().chunk_size(0).chunk_overlap(0).build().unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }
}
