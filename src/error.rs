//! Error types for the `medrag` crate.

use thiserror::Error;

/// Errors that can occur in the retrieval pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error (bad chunk sizes, missing settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A document-loading input error (missing or unusable corpus directory).
    #[error("Input error: {0}")]
    Input(String),

    /// An index build was attempted with no chunks to index.
    #[error("Cannot build an index from an empty chunk set")]
    EmptyInput,

    /// A persisted collection was requested but does not exist.
    #[error("Collection '{0}' not found in the vector store")]
    CollectionNotFound(String),

    /// Search was attempted before the index was built or opened.
    #[error("Index not initialized: call build or open before searching")]
    NotInitialized,

    /// The persisted collection was embedded with a different model than the
    /// one currently configured. Searching across models silently corrupts
    /// similarity ranking, so this fails on open instead.
    #[error("Embedding model mismatch: collection was built with '{stored}' but '{configured}' is configured")]
    ModelMismatch {
        /// The model identifier recorded when the collection was built.
        stored: String,
        /// The model identifier the current provider reports.
        configured: String,
    },

    /// The embedding service failed or returned malformed output.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The generation service failed or returned malformed output.
    #[error("Generation error ({provider}): {message}")]
    Generation {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
