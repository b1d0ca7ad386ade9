use std::time::Duration;

use docent_llm::LlmError;
use docent_memory::IndexError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("question must not be empty")]
    InvalidInput,

    #[error("failed to embed question: {0}")]
    Embedding(#[source] LlmError),

    #[error("retrieval failed: {0}")]
    Retrieval(#[source] IndexError),

    #[error("completion failed: {0}")]
    Completion(#[source] LlmError),

    #[error("LLM request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl From<IndexError> for QueryError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::QueryEmbedding(source) => Self::Embedding(source),
            other => Self::Retrieval(other),
        }
    }
}
