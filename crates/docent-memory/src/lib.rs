//! Document ingestion and the embedding-backed vector index.

pub mod document;
pub mod index;

pub use index::{IndexError, IndexedEntry, PersistenceError, SearchHit, VectorIndex};

/// Fixed token approximation used for chunk sizing: one token per four characters.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `chars / CHARS_PER_TOKEN`.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_tokens_ascii() {
        assert_eq!(estimate_tokens("Hello, world!"), 3);
    }

    #[test]
    fn estimate_tokens_unicode() {
        assert_eq!(estimate_tokens("Привет мир"), 2);
    }

    #[test]
    fn estimate_tokens_empty() {
        assert_eq!(estimate_tokens(""), 0);
    }
}
