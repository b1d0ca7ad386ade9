use std::path::PathBuf;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_llm();
        self.apply_env_overrides_index();
        self.apply_env_overrides_retrieval();
    }

    fn apply_env_overrides_llm(&mut self) {
        if let Ok(v) = std::env::var("DOCENT_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("DOCENT_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("DOCENT_LLM_EMBEDDING_MODEL") {
            self.llm.embedding_model = v;
        }
        if let Ok(v) = std::env::var("DOCENT_LLM_TEMPERATURE") {
            if let Ok(t) = v.parse::<f32>()
                && t.is_finite()
            {
                self.llm.temperature = t;
            } else {
                tracing::warn!("ignoring invalid DOCENT_LLM_TEMPERATURE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("DOCENT_LLM_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse::<u64>() {
                self.llm.timeout_secs = Some(secs);
            } else {
                tracing::warn!("ignoring invalid DOCENT_LLM_TIMEOUT_SECS value: {v}");
            }
        }
    }

    fn apply_env_overrides_index(&mut self) {
        if let Ok(v) = std::env::var("DOCENT_INDEX_PATH") {
            self.index.path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DOCENT_INDEX_DOCUMENTS") {
            self.index.documents = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Ok(v) = std::env::var("DOCENT_INDEX_REBUILD") {
            if let Ok(rebuild) = v.parse::<bool>() {
                self.index.rebuild = rebuild;
            } else {
                tracing::warn!("ignoring invalid DOCENT_INDEX_REBUILD value: {v}");
            }
        }
    }

    fn apply_env_overrides_retrieval(&mut self) {
        if let Ok(v) = std::env::var("DOCENT_RETRIEVAL_TOP_K") {
            if let Ok(k) = v.parse::<usize>() {
                self.retrieval.top_k = k;
            } else {
                tracing::warn!("ignoring invalid DOCENT_RETRIEVAL_TOP_K value: {v}");
            }
        }
        if let Ok(v) = std::env::var("DOCENT_RETRIEVAL_THRESHOLD") {
            if let Ok(threshold) = v.parse::<f32>()
                && !threshold.is_nan()
            {
                self.retrieval.similarity_threshold = threshold.clamp(-1.0, 1.0);
            } else {
                tracing::warn!("ignoring invalid DOCENT_RETRIEVAL_THRESHOLD value: {v}");
            }
        }
    }
}
