use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Generation parameters passed with every completion call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
}

impl CompletionOptions {
    #[must_use]
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }
}

pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single rendered prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to communicate or the response is invalid.
    fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Produce the embedding vector for `text`.
    ///
    /// Implementations must return vectors of the same length for every input
    /// and must be deterministic for a given embedding model.
    ///
    /// # Errors
    ///
    /// Returns an error if embeddings are unsupported or the request fails.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    fn supports_embeddings(&self) -> bool;

    fn name(&self) -> &str;
}
