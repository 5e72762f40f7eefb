//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], which
//! splits text into overlapping chunks while preferring natural break points
//! (paragraph breaks, then line breaks, then sentence ends, then spaces)
//! over hard character cuts.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and provenance but no
/// embeddings. Embeddings are attached later by the index.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Each returned
    /// chunk has an empty embedding vector and an ascending `sequence_index`.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;

    /// Split a sequence of documents, preserving input order.
    fn split(&self, documents: &[Document]) -> Vec<Chunk> {
        documents.iter().flat_map(|d| self.chunk(d)).collect()
    }
}

/// Boundary separators tried from most to least preferred. Within one
/// priority level the latest occurrence in the window wins.
const BOUNDARY_LEVELS: [&[&str]; 4] = [&["\n\n"], &["\n"], &[". ", "! ", "? "], &[" "]];

/// Splits text into chunks of at most `chunk_size` characters, overlapping
/// consecutive chunks by up to `chunk_overlap` characters.
///
/// Sizes are measured in Unicode scalar values, not bytes, so multi-byte
/// text never splits inside a character. Every chunk is a contiguous
/// substring of the source document, and chunking is fully deterministic:
/// the same text and parameters always produce the same chunk sequence.
///
/// Break points are chosen by scanning the tail half of each window for the
/// highest-priority boundary present; only when a window contains none of
/// the preferred boundaries does the splitter fall back to a hard cut at
/// `chunk_size`.
///
/// # Example
///
/// ```rust,ignore
/// use medrag::{Chunker, RecursiveChunker};
///
/// let chunker = RecursiveChunker::new(1000, 200);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between
    ///   consecutive chunks; must be less than `chunk_size`
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `chunk_overlap >= chunk_size` or
    /// `chunk_size == 0`. [`RagConfig`](crate::config::RagConfig) enforces
    /// the same constraints with an error at build time; this guard catches
    /// direct construction that bypasses the config path.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk_size must be greater than zero");
        debug_assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
        );
        Self { chunk_size, chunk_overlap }
    }

    /// Split raw text into chunk strings.
    fn split_text(&self, text: &str) -> Vec<String> {
        // Byte offsets of every char boundary, plus the end of the text.
        // All window arithmetic is done in char positions and mapped back
        // through this table so slicing never lands inside a code point.
        let bounds: Vec<usize> =
            text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
        let total_chars = bounds.len() - 1;

        if total_chars == 0 {
            return Vec::new();
        }
        if total_chars <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let end = (start + self.chunk_size).min(total_chars);
            let break_at = if end < total_chars {
                self.find_break(text, &bounds, start, end)
            } else {
                end
            };

            chunks.push(text[bounds[start]..bounds[break_at]].to_string());

            if break_at == total_chars {
                break;
            }
            // Step back to create the overlap, but always advance by at
            // least one character.
            start = break_at.saturating_sub(self.chunk_overlap).max(start + 1);
        }

        chunks
    }

    /// Choose the break point for the window `[start, end)` of char
    /// positions, where `end` is strictly inside the text.
    ///
    /// Boundaries are eligible only in the tail half of the window, which
    /// keeps an early paragraph break from producing a degenerately short
    /// chunk and guarantees the next start position always advances past
    /// the previous break.
    fn find_break(&self, text: &str, bounds: &[usize], start: usize, end: usize) -> usize {
        let min_break = start + (self.chunk_size / 2).max(self.chunk_overlap + 1);
        if min_break >= end {
            return end;
        }

        let window = &text[bounds[start]..bounds[end]];
        // ASCII separators, so byte offsets within the window stay on char
        // boundaries.
        let min_break_bytes = bounds[min_break] - bounds[start];

        for level in BOUNDARY_LEVELS {
            let best = level
                .iter()
                .filter_map(|sep| window.rfind(sep).map(|at| at + sep.len()))
                .filter(|&b| b > min_break_bytes)
                .max();
            if let Some(break_bytes) = best {
                let abs = bounds[start] + break_bytes;
                // Map the byte offset back to a char position.
                return bounds.partition_point(|&b| b < abs);
            }
        }

        end
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        self.split_text(&document.text)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk {
                id: format!("{}_{i}", document.id),
                text,
                document_id: document.id.clone(),
                sequence_index: i,
                embedding: Vec::new(),
            })
            .collect()
    }
}
