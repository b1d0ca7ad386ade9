//! Application bootstrap: provider construction and vector index restore-or-build.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use docent_llm::any::AnyProvider;
use docent_llm::ollama::OllamaProvider;
use docent_llm::{CompletionOptions, LlmProvider};
use docent_memory::VectorIndex;
use docent_memory::document::{IngestionPipeline, SplitterConfig, TextSplitter};

use crate::config::Config;
use crate::query::QueryEngine;

#[must_use]
pub fn create_provider(config: &Config) -> AnyProvider {
    AnyProvider::Ollama(OllamaProvider::new(
        &config.llm.base_url,
        config.llm.embedding_model.clone(),
    ))
}

pub async fn health_check(provider: &AnyProvider) {
    match provider {
        AnyProvider::Ollama(ollama) => match ollama.health_check().await {
            Ok(()) => tracing::info!("ollama health check passed"),
            Err(e) => tracing::warn!("ollama health check failed: {e:#}"),
        },
        #[allow(unreachable_patterns)]
        _ => {}
    }
}

#[must_use]
pub fn completion_options(config: &Config) -> CompletionOptions {
    CompletionOptions::new(config.llm.model.clone(), config.llm.temperature)
}

/// Ingest `index.documents` and write the snapshot, ignoring any existing one.
///
/// # Errors
///
/// Returns an error if no documents are configured or ingestion fails.
pub async fn rebuild_index<P: LlmProvider>(
    config: &Config,
    provider: Arc<P>,
) -> anyhow::Result<VectorIndex> {
    if config.index.documents.is_empty() {
        bail!(
            "no documents configured to build {} (set [index] documents or DOCENT_INDEX_DOCUMENTS)",
            config.index.path.display()
        );
    }
    let splitter = TextSplitter::new(SplitterConfig::from(&config.chunking));
    let pipeline = IngestionPipeline::new(splitter, provider);
    pipeline
        .run_and_save(&config.index.documents, &config.index.path)
        .await
        .context("document ingestion failed")
}

/// Restore the snapshot when present, otherwise build it from the configured documents.
///
/// A snapshot that exists but cannot be read is fatal; it is never silently rebuilt.
///
/// # Errors
///
/// Returns an error if the snapshot is unreadable or ingestion fails.
pub async fn load_or_build_index<P: LlmProvider>(
    config: &Config,
    provider: Arc<P>,
) -> anyhow::Result<VectorIndex> {
    let path = &config.index.path;
    if config.index.rebuild {
        tracing::info!("index rebuild requested");
        return rebuild_index(config, provider).await;
    }
    if path.exists() {
        return VectorIndex::load(path)
            .with_context(|| format!("failed to load vector index from {}", path.display()));
    }
    tracing::info!(path = %path.display(), "no vector index snapshot found, ingesting documents");
    rebuild_index(config, provider).await
}

#[must_use]
pub fn build_engine<P: LlmProvider>(
    config: &Config,
    provider: Arc<P>,
    index: VectorIndex,
) -> QueryEngine<P> {
    QueryEngine::new(provider, index, completion_options(config))
        .with_retrieval(config.retrieval.top_k, config.retrieval.similarity_threshold)
        .with_timeout(config.llm.timeout_secs.map(Duration::from_secs))
}
