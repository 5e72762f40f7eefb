//! Data types for documents, chunks, search results, and answers.

use serde::{Deserialize, Serialize};

/// A source document containing the full text of one corpus file.
///
/// Documents are immutable once loaded and are consumed by the chunker;
/// only chunks persist downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier for the document; the loader uses the file name.
    pub id: String,
    /// The text content of the document.
    pub text: String,
}

impl Document {
    /// Create a document from an id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A contiguous segment of a [`Document`] with its vector embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk, `{document_id}_{sequence_index}`.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Position of this chunk within its parent document, starting at 0.
    pub sequence_index: usize,
    /// The vector embedding for this chunk's text. Empty until the index
    /// attaches it.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

/// A retrieved [`Chunk`] paired with a relevance score.
///
/// Scores are cosine similarities; higher is more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// A grounded answer with the documents it was drawn from.
///
/// `sources` lists parent document ids in retrieval rank order with
/// duplicates removed. An empty `sources` means no supporting text was
/// retrieved, never "unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagAnswer {
    /// The answer text.
    pub answer: String,
    /// Document ids of the chunks the answer was grounded on.
    pub sources: Vec<String>,
}
