//! Question answering over a loaded vector index.

use std::sync::Arc;
use std::time::Duration;

use docent_llm::{CompletionOptions, LlmProvider};
use docent_memory::index::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};
use docent_memory::{SearchHit, VectorIndex};
use tokio::sync::RwLock;

use crate::context::{format_passage, join_passages};
use crate::error::QueryError;
use crate::prompt::answer_prompt;

/// Passages retrieved for one question and the information block built from them.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub hits: Vec<SearchHit>,
    pub information: String,
}

pub struct QueryEngine<P> {
    provider: Arc<P>,
    index: Arc<RwLock<Arc<VectorIndex>>>,
    options: CompletionOptions,
    top_k: usize,
    similarity_threshold: f32,
    timeout: Option<Duration>,
}

impl<P: LlmProvider> QueryEngine<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, index: VectorIndex, options: CompletionOptions) -> Self {
        Self {
            provider,
            index: Arc::new(RwLock::new(Arc::new(index))),
            options,
            top_k: DEFAULT_TOP_K,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_retrieval(mut self, top_k: usize, similarity_threshold: f32) -> Self {
        self.top_k = top_k;
        self.similarity_threshold = similarity_threshold;
        self
    }

    /// Bound every embedding and completion call. `None` disables the limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Current index. Queries already in flight keep the snapshot they started with.
    pub async fn index(&self) -> Arc<VectorIndex> {
        Arc::clone(&*self.index.read().await)
    }

    /// Swap in a freshly built index.
    pub async fn replace_index(&self, index: VectorIndex) {
        let entries = index.len();
        *self.index.write().await = Arc::new(index);
        tracing::info!(entries, "vector index replaced");
    }

    /// Rank passages for `text` with explicit retrieval parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding the text fails or times out.
    pub async fn search(
        &self,
        text: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<SearchHit>, QueryError> {
        let index = self.index().await;
        let hits = self
            .bounded(index.search(self.provider.as_ref(), text, top_k, similarity_threshold))
            .await??;
        tracing::debug!(
            hits = hits.len(),
            top_score = hits.first().map(|h| h.score),
            "retrieval finished"
        );
        Ok(hits)
    }

    /// Retrieve passages for `question` and assemble the cleaned information block.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidInput`] for a blank question, or an error if
    /// the question cannot be embedded.
    pub async fn retrieve(&self, question: &str) -> Result<Retrieval, QueryError> {
        if question.trim().is_empty() {
            return Err(QueryError::InvalidInput);
        }
        let hits = self
            .search(question, self.top_k, self.similarity_threshold)
            .await?;
        let formatted: Vec<String> = hits
            .iter()
            .map(|hit| format_passage(&hit.chunk, hit.score))
            .collect();
        let information = join_passages(formatted.iter().map(String::as_str));
        Ok(Retrieval { hits, information })
    }

    /// Full prompt that [`answer`](Self::answer) would send for `question`.
    ///
    /// # Errors
    ///
    /// Same as [`retrieve`](Self::retrieve).
    pub async fn build_prompt(&self, question: &str) -> Result<String, QueryError> {
        let retrieval = self.retrieve(question).await?;
        Ok(answer_prompt(&retrieval.information, question))
    }

    /// Answer `question` from the indexed documents.
    ///
    /// Finding no relevant passages is not an error: the model is still asked,
    /// with an empty information block.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank question, or if embedding or completion fails
    /// or times out.
    pub async fn answer(&self, question: &str) -> Result<String, QueryError> {
        let prompt = self.build_prompt(question).await?;
        let answer = self
            .bounded(self.provider.complete(&prompt, &self.options))
            .await?
            .map_err(|e| {
                tracing::warn!("completion failed: {e}");
                QueryError::Completion(e)
            })?;
        Ok(answer.trim_end().to_owned())
    }

    async fn bounded<F: Future>(&self, fut: F) -> Result<F::Output, QueryError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                tracing::warn!(timeout_secs = limit.as_secs(), "LLM request timed out");
                QueryError::Timeout(limit)
            }),
            None => Ok(fut.await),
        }
    }
}
