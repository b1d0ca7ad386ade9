//! In-memory vector index with cosine-similarity search.
//!
//! Entries are keyed by chunk id. The index enforces a single embedding
//! dimensionality and is populated through [`VectorIndex::add`], which embeds a
//! whole batch before touching the map so a failed call leaves it unchanged.

mod error;
mod snapshot;

pub use error::{IndexError, PersistenceError};

use std::cmp::Ordering;
use std::collections::BTreeMap;

use docent_llm::LlmProvider;

use crate::document::Chunk;

pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: BTreeMap<String, IndexedEntry>,
    dimension: Option<usize>,
}

pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding length shared by every entry, `None` while empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IndexedEntry> {
        self.entries.get(id)
    }

    /// Entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.entries.values()
    }

    /// Insert a pre-embedded chunk, replacing any entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding is empty or its length differs from the
    /// index dimensionality.
    pub fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> Result<(), IndexError> {
        self.check_dimension(&chunk.id, embedding.len())?;
        self.dimension = Some(embedding.len());
        self.entries
            .insert(chunk.id.clone(), IndexedEntry { chunk, embedding });
        Ok(())
    }

    /// Embed every chunk with `provider` and insert the results.
    ///
    /// All embeddings are computed before the index is modified, so any failure
    /// leaves the index exactly as it was. Returns the number of entries added.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Embedding`] on the first failed embedding call, or a
    /// dimension error if the provider returns inconsistent vectors.
    pub async fn add<P: LlmProvider>(
        &mut self,
        provider: &P,
        chunks: Vec<Chunk>,
    ) -> Result<usize, IndexError> {
        let mut staged = Vec::with_capacity(chunks.len());
        let mut dimension = self.dimension;

        for chunk in chunks {
            let embedding =
                provider
                    .embed(&chunk.text)
                    .await
                    .map_err(|source| IndexError::Embedding {
                        chunk_id: chunk.id.clone(),
                        source,
                    })?;
            if embedding.is_empty() {
                return Err(IndexError::EmptyEmbedding(chunk.id));
            }
            match dimension {
                Some(expected) if expected != embedding.len() => {
                    return Err(IndexError::DimensionMismatch {
                        id: chunk.id,
                        expected,
                        actual: embedding.len(),
                    });
                }
                _ => dimension = Some(embedding.len()),
            }
            staged.push((chunk, embedding));
        }

        let count = staged.len();
        for (chunk, embedding) in staged {
            self.insert(chunk, embedding)?;
        }
        tracing::debug!(count, total = self.len(), "chunks added to index");
        Ok(count)
    }

    /// Embed `query` and return the best matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query embedding fails or has the wrong length.
    pub async fn search<P: LlmProvider>(
        &self,
        provider: &P,
        query: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<SearchHit>, IndexError> {
        if self.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let vector = provider
            .embed(query)
            .await
            .map_err(IndexError::QueryEmbedding)?;
        self.search_by_vector(&vector, top_k, similarity_threshold)
    }

    /// Rank entries against a precomputed query vector.
    ///
    /// Entries scoring below `similarity_threshold` are dropped before truncation
    /// to `top_k`. Results are ordered by descending score, then ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] if `vector` does not match the index.
    pub fn search_by_vector(
        &self,
        vector: &[f32],
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<SearchHit>, IndexError> {
        if self.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        self.check_dimension("query", vector.len())?;

        let mut scored: Vec<(&IndexedEntry, f32)> = self
            .entries
            .values()
            .map(|entry| (entry, cosine_similarity(vector, &entry.embedding)))
            .filter(|(_, score)| *score >= similarity_threshold)
            .collect();

        scored.sort_by(|(a, score_a), (b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(entry, score)| SearchHit {
                chunk: entry.chunk.clone(),
                score,
            })
            .collect())
    }

    fn check_dimension(&self, id: &str, actual: usize) -> Result<(), IndexError> {
        if actual == 0 {
            return Err(IndexError::EmptyEmbedding(id.to_owned()));
        }
        match self.dimension {
            Some(expected) if expected != actual => Err(IndexError::DimensionMismatch {
                id: id.to_owned(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}
