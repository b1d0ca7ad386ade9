use std::path::PathBuf;

use docent_memory::document::SplitterConfig;
use docent_memory::index::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "gemma3:4b".into()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}

fn default_temperature() -> f32 {
    0.3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-call limit for embedding and completion requests. No limit when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from("vectorstore.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Snapshot file.
    #[serde(default = "default_index_path")]
    pub path: PathBuf,
    /// Files ingested when no snapshot is available or `rebuild` is set.
    #[serde(default)]
    pub documents: Vec<PathBuf>,
    #[serde(default)]
    pub rebuild: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
            documents: Vec::new(),
            rebuild: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size_tokens")]
    pub chunk_size_tokens: usize,
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,
    #[serde(default = "default_min_chunk_len_to_embed")]
    pub min_chunk_len_to_embed: usize,
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

fn default_chunk_size_tokens() -> usize {
    SplitterConfig::default().chunk_size_tokens
}

fn default_min_chunk_chars() -> usize {
    SplitterConfig::default().min_chunk_chars
}

fn default_min_chunk_len_to_embed() -> usize {
    SplitterConfig::default().min_chunk_len_to_embed
}

fn default_max_chunks() -> usize {
    SplitterConfig::default().max_chunks
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::from(SplitterConfig::default())
    }
}

impl From<SplitterConfig> for ChunkingConfig {
    fn from(c: SplitterConfig) -> Self {
        Self {
            chunk_size_tokens: c.chunk_size_tokens,
            min_chunk_chars: c.min_chunk_chars,
            min_chunk_len_to_embed: c.min_chunk_len_to_embed,
            max_chunks: c.max_chunks,
        }
    }
}

impl From<&ChunkingConfig> for SplitterConfig {
    fn from(c: &ChunkingConfig) -> Self {
        Self {
            chunk_size_tokens: c.chunk_size_tokens,
            min_chunk_chars: c.min_chunk_chars,
            min_chunk_len_to_embed: c.min_chunk_len_to_embed,
            max_chunks: c.max_chunks,
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}
