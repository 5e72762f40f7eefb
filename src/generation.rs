//! Generation provider trait for answer synthesis.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that produces answer text from a prompt.
///
/// The generative model is an opaque collaborator: given a system prompt and
/// a user question, it returns text. Retry and backoff policy, if any,
/// belongs to the caller; implementations report failures as
/// [`RagError::Generation`](crate::RagError::Generation) without retrying.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate answer text for the given system prompt and user message.
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}
