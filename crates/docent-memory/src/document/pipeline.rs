use std::path::{Path, PathBuf};
use std::sync::Arc;

use docent_llm::LlmProvider;

use super::{Document, DocumentError, TextSplitter, loader_for_path};
use crate::index::VectorIndex;

/// One-shot corpus ingestion: load, split, embed, index.
pub struct IngestionPipeline<P> {
    splitter: TextSplitter,
    provider: Arc<P>,
}

impl<P: LlmProvider> IngestionPipeline<P> {
    #[must_use]
    pub fn new(splitter: TextSplitter, provider: Arc<P>) -> Self {
        Self { splitter, provider }
    }

    /// Split and embed already-loaded documents into a fresh index.
    ///
    /// # Errors
    ///
    /// Returns an error if any chunk fails to embed. No partial index is returned.
    pub async fn ingest(&self, documents: &[Document]) -> Result<VectorIndex, DocumentError> {
        let pages: usize = documents.iter().map(|d| d.pages.len()).sum();
        let chunks = self.splitter.split_documents(documents);
        tracing::info!(
            documents = documents.len(),
            pages,
            chunks = chunks.len(),
            "embedding chunks"
        );

        let mut index = VectorIndex::new();
        index.add(self.provider.as_ref(), chunks).await?;
        Ok(index)
    }

    /// Load every path with the loader matching its extension, then ingest.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be loaded or any chunk fails to embed.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<VectorIndex, DocumentError> {
        tracing::info!(files = paths.len(), "ingestion started");
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let loader = loader_for_path(path)?;
            let document = loader.load(path).await?;
            tracing::debug!(
                source = %document.source_file,
                pages = document.pages.len(),
                "document loaded"
            );
            documents.push(document);
        }

        let index = self.ingest(&documents).await?;
        tracing::info!(entries = index.len(), "ingestion finished");
        Ok(index)
    }

    /// [`run`](Self::run) followed by a snapshot write to `snapshot_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if ingestion or the snapshot write fails.
    pub async fn run_and_save(
        &self,
        paths: &[PathBuf],
        snapshot_path: &Path,
    ) -> Result<VectorIndex, DocumentError> {
        let index = self.run(paths).await?;
        index
            .save(snapshot_path)
            .map_err(crate::index::IndexError::from)?;
        Ok(index)
    }
}
