use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IndexError, PersistenceError, VectorIndex};
use crate::document::{Chunk, Metadata};

/// On-disk form of one entry. The snapshot file is a JSON object keyed by chunk id.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    text: String,
    metadata: Metadata,
    embedding: Vec<f32>,
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl VectorIndex {
    /// Write the index to `path` as JSON.
    ///
    /// The snapshot is written to a sibling temporary file and renamed into
    /// place, so a crash mid-write never leaves a truncated snapshot behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let snapshot: BTreeMap<&str, SnapshotEntry> = self
            .entries
            .iter()
            .map(|(id, entry)| {
                (
                    id.as_str(),
                    SnapshotEntry {
                        text: entry.chunk.text.clone(),
                        metadata: entry.chunk.metadata.clone(),
                        embedding: entry.embedding.clone(),
                    },
                )
            })
            .collect();
        let bytes = serde_json::to_vec(&snapshot)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        let mut file = std::fs::File::create(&tmp).map_err(|e| io_error(&tmp, e))?;
        file.write_all(&bytes).map_err(|e| io_error(&tmp, e))?;
        file.sync_all().map_err(|e| io_error(&tmp, e))?;
        drop(file);
        std::fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;

        tracing::info!(path = %path.display(), entries = self.len(), "vector index saved");
        Ok(())
    }

    /// Read an index previously written by [`VectorIndex::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, is not valid JSON
    /// of the expected shape, or holds embeddings of differing lengths.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
        let snapshot: BTreeMap<String, SnapshotEntry> = serde_json::from_slice(&bytes)?;

        let mut index = Self::new();
        for (id, entry) in snapshot {
            let chunk = Chunk {
                id,
                text: entry.text,
                metadata: entry.metadata,
            };
            index
                .insert(chunk, entry.embedding)
                .map_err(|e| match e {
                    IndexError::Persistence(inner) => inner,
                    other => PersistenceError::Corrupt(other.to_string()),
                })?;
        }

        tracing::info!(path = %path.display(), entries = index.len(), "vector index loaded");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::page_metadata;

    fn sample_index() -> VectorIndex {
        let mut index = VectorIndex::new();
        for (id, text, embedding) in [
            ("a", "warranty lasts two years", vec![0.1_f32, 0.2, 0.3]),
            ("b", "returns within 30 days", vec![-0.5, 0.25, 1.0e-7]),
        ] {
            index
                .insert(
                    Chunk {
                        id: id.into(),
                        text: text.into(),
                        metadata: page_metadata("policy.pdf", 3),
                    },
                    embedding,
                )
                .unwrap();
        }
        index
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.json");
        let original = sample_index();
        original.save(&path).unwrap();

        let restored = VectorIndex::load(&path).unwrap();
        assert_eq!(restored.len(), original.len());
        assert_eq!(restored.dimension(), Some(3));
        for entry in original.entries() {
            let other = restored.get(&entry.chunk.id).unwrap();
            assert_eq!(other.chunk, entry.chunk);
            for (x, y) in entry.embedding.iter().zip(&other.embedding) {
                assert!((x - y).abs() < 1e-6);
            }
        }
        assert!(!dir.path().join("nested").join("index.json.tmp").exists());
    }

    #[test]
    fn search_results_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let original = sample_index();
        original.save(&path).unwrap();
        let restored = VectorIndex::load(&path).unwrap();

        let query = [0.1, 0.2, 0.3];
        let before = original.search_by_vector(&query, 2, -1.0).unwrap();
        let after = restored.search_by_vector(&query, 2, -1.0).unwrap();
        let ids = |hits: &[crate::index::SearchHit]| {
            hits.iter().map(|h| h.chunk.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&before), ids(&after));
    }

    #[test]
    fn snapshot_uses_id_keyed_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        sample_index().save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &value["a"];
        assert_eq!(entry["text"], "warranty lasts two years");
        assert_eq!(entry["metadata"]["source_file"], "policy.pdf");
        assert_eq!(entry["metadata"]["page_number"], "3");
        assert_eq!(entry["embedding"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn empty_index_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        VectorIndex::new().save(&path).unwrap();
        assert!(VectorIndex::load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = VectorIndex::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn load_malformed_json_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            VectorIndex::load(&path),
            Err(PersistenceError::Format(_))
        ));
    }

    #[test]
    fn load_mixed_dimensions_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(
            &path,
            r#"{"a":{"text":"x","metadata":{},"embedding":[1.0,0.0]},
                "b":{"text":"y","metadata":{},"embedding":[1.0]}}"#,
        )
        .unwrap();
        assert!(matches!(
            VectorIndex::load(&path),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn save_overwrites_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        sample_index().save(&path).unwrap();
        VectorIndex::new().save(&path).unwrap();
        assert!(VectorIndex::load(&path).unwrap().is_empty());
    }
}
