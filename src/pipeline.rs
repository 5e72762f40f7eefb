//! Answer assembly: retrieved chunks + question → grounded answer.

use std::sync::Arc;

use tracing::{error, info};

use crate::document::RagAnswer;
use crate::error::Result;
use crate::generation::GenerationProvider;
use crate::retriever::Retriever;

/// Answer returned when retrieval finds nothing relevant. The generative
/// model is not called in that case.
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information to answer your question.";

const SYSTEM_PROMPT: &str = "You are a helpful medical assistant. Answer the user's question \
based on the provided context.\n\
If the context doesn't contain enough information to answer the question, say so clearly.\n\
Always provide accurate medical information and remind users to consult healthcare \
professionals for personalized advice.\n\nContext:\n";

/// The question-answering pipeline.
///
/// Retrieves the top-K chunks for a question, assembles a grounded prompt,
/// and asks the generation provider for an answer. Provenance comes back as
/// the parent document ids of the retrieved chunks, in rank order with
/// duplicates removed.
pub struct RagPipeline {
    retriever: Retriever,
    generation: Arc<dyn GenerationProvider>,
    top_k: usize,
}

impl RagPipeline {
    /// Create a pipeline over an initialized retriever.
    pub fn new(retriever: Retriever, generation: Arc<dyn GenerationProvider>, top_k: usize) -> Self {
        Self { retriever, generation, top_k }
    }

    /// Answer a question using retrieval-augmented generation.
    ///
    /// If no chunks are retrieved, returns [`NO_CONTEXT_ANSWER`] with empty
    /// sources without calling the generation provider. Collaborator
    /// failures propagate to the caller; the interactive loop reports them
    /// per turn.
    pub async fn answer(&self, question: &str) -> Result<RagAnswer> {
        let results = self.retriever.retrieve(question, self.top_k).await?;

        if results.is_empty() {
            info!("no relevant chunks retrieved, skipping generation");
            return Ok(RagAnswer { answer: NO_CONTEXT_ANSWER.to_string(), sources: Vec::new() });
        }

        let context =
            results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");
        let system_prompt = format!("{SYSTEM_PROMPT}{context}");

        let answer = self.generation.generate(&system_prompt, question).await.map_err(|e| {
            error!(error = %e, "generation failed");
            e
        })?;

        let mut sources = Vec::new();
        for result in &results {
            if !sources.contains(&result.chunk.document_id) {
                sources.push(result.chunk.document_id.clone());
            }
        }

        info!(source_count = sources.len(), "answered question");
        Ok(RagAnswer { answer, sources })
    }
}
