#[cfg(feature = "mock")]
use crate::mock::MockProvider;
use crate::ollama::OllamaProvider;

use crate::error::LlmError;
use crate::provider::{CompletionOptions, LlmProvider};

/// Generates a match over all `AnyProvider` variants, binding the inner provider
/// and evaluating the given closure for each arm.
macro_rules! delegate_provider {
    ($self:expr, |$p:ident| $expr:expr) => {
        match $self {
            AnyProvider::Ollama($p) => $expr,
            #[cfg(feature = "mock")]
            AnyProvider::Mock($p) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyProvider {
    Ollama(OllamaProvider),
    #[cfg(feature = "mock")]
    Mock(MockProvider),
}

impl LlmProvider for AnyProvider {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, LlmError> {
        delegate_provider!(self, |p| p.complete(prompt, options).await)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        delegate_provider!(self, |p| p.embed(text).await)
    }

    fn supports_embeddings(&self) -> bool {
        delegate_provider!(self, |p| p.supports_embeddings())
    }

    fn name(&self) -> &str {
        delegate_provider!(self, |p| p.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_ollama_name() {
        let provider = AnyProvider::Ollama(OllamaProvider::new(
            "http://localhost:11434",
            "embed".into(),
        ));
        assert_eq!(provider.name(), "ollama");
        assert!(provider.supports_embeddings());
    }

    #[tokio::test]
    async fn any_ollama_embed_unreachable_errors() {
        let provider =
            AnyProvider::Ollama(OllamaProvider::new("http://127.0.0.1:1", "embed".into()));
        assert!(provider.embed("text").await.is_err());
    }

    #[test]
    fn any_clone_debug() {
        let provider = AnyProvider::Ollama(OllamaProvider::new(
            "http://localhost:11434",
            "embed".into(),
        ));
        let cloned = provider.clone();
        assert!(format!("{cloned:?}").contains("Ollama"));
    }

    #[cfg(feature = "mock")]
    #[tokio::test]
    async fn any_mock_delegates_complete() {
        let provider = AnyProvider::Mock(MockProvider::with_responses(vec!["hi".into()]));
        let opts = CompletionOptions::new("m", 0.3);
        assert_eq!(provider.complete("p", &opts).await.unwrap(), "hi");
        assert_eq!(provider.name(), "mock");
    }
}
