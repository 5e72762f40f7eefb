//! Retrieval-augmented question answering over a local medical corpus.
//!
//! `medrag` ingests a directory of plain-text documents, splits them into
//! overlapping chunks, embeds and persists the chunks in a named collection,
//! and answers questions by retrieving the most similar chunks and handing
//! them to a generative model together with the question.
//!
//! The moving parts compose through traits so tests can substitute
//! deterministic fakes:
//!
//! - [`Chunker`] / [`RecursiveChunker`] — boundary-aware overlapping splits
//! - [`EmbeddingProvider`] — text → vector
//! - [`VectorStore`] — named collections of embedded chunks
//!   ([`InMemoryVectorStore`], [`JsonFileVectorStore`])
//! - [`EmbeddingIndex`] — the build/open/search lifecycle over one collection
//! - [`Retriever`] — build-or-open at startup, `retrieve(query, k)` after
//! - [`GenerationProvider`] / [`RagPipeline`] — grounded answer assembly
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medrag::{
//!     EmbeddingIndex, InMemoryVectorStore, RagConfig, RecursiveChunker, Retriever,
//! };
//!
//! let config = RagConfig::default();
//! let index = Arc::new(EmbeddingIndex::new(provider, Arc::new(InMemoryVectorStore::new()),
//!     &config.collection));
//! let retriever = Retriever::new(index, Arc::new(RecursiveChunker::new(
//!     config.chunk_size, config.chunk_overlap)));
//! retriever.initialize("./data").await?;
//! let results = retriever.retrieve("What are the symptoms of diabetes?", config.top_k).await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod inmemory;
pub mod jsonstore;
pub mod loader;
pub mod openai;
pub mod pipeline;
pub mod retriever;
pub mod vectorstore;

pub use chunking::{Chunker, RecursiveChunker};
pub use config::RagConfig;
pub use document::{Chunk, Document, RagAnswer, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::GenerationProvider;
pub use index::EmbeddingIndex;
pub use inmemory::InMemoryVectorStore;
pub use jsonstore::JsonFileVectorStore;
pub use loader::load_from_directory;
pub use openai::{OpenAIChatProvider, OpenAIEmbeddingProvider};
pub use pipeline::{NO_CONTEXT_ANSWER, RagPipeline};
pub use retriever::Retriever;
pub use vectorstore::VectorStore;
