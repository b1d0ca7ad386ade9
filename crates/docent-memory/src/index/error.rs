use std::path::PathBuf;

use docent_llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("embedding failed for chunk {chunk_id}: {source}")]
    Embedding {
        chunk_id: String,
        #[source]
        source: LlmError,
    },

    #[error("query embedding failed: {0}")]
    QueryEmbedding(#[source] LlmError),

    #[error("embedding dimension mismatch for {id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("empty embedding for {0}")]
    EmptyEmbedding(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failure to read or write an index snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("snapshot I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}
