use super::types::{Chunk, Document, META_PAGE_NUMBER, META_SOURCE_FILE, Metadata};
use crate::CHARS_PER_TOKEN;

const CHUNK_NAMESPACE: uuid::Uuid = uuid::Uuid::from_bytes([
    0x4d, 0x6f, 0x63, 0x65, 0x6e, 0x74, 0x4c, 0x8a, 0x9b, 0x21, 0x63, 0x68, 0x75, 0x6e, 0x6b, 0x73,
]);

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Target chunk size in estimated tokens.
    pub chunk_size_tokens: usize,
    /// Non-final pieces shorter than this are merged into the next piece.
    pub min_chunk_chars: usize,
    /// Chunks shorter than this after trimming are dropped.
    pub min_chunk_len_to_embed: usize,
    /// Upper bound on chunks produced by one ingestion run.
    pub max_chunks: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size_tokens: 800,
            min_chunk_chars: 350,
            min_chunk_len_to_embed: 5,
            max_chunks: 10_000,
        }
    }
}

impl SplitterConfig {
    #[must_use]
    pub fn window_chars(&self) -> usize {
        self.chunk_size_tokens.saturating_mul(CHARS_PER_TOKEN).max(1)
    }
}

pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    #[must_use]
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split one page of text into chunks, in reading order.
    ///
    /// Ids derive from the `source_file` and `page_number` metadata entries plus the
    /// position of the chunk within the page, so identical input yields identical ids.
    #[must_use]
    pub fn split(&self, text: &str, metadata: &Metadata) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let source = metadata.get(META_SOURCE_FILE).map_or("", String::as_str);
        let page = metadata.get(META_PAGE_NUMBER).map_or("", String::as_str);

        let pieces =
            split_at_whitespace(text, self.config.window_chars(), self.config.min_chunk_chars);
        merge_short_pieces(&pieces, self.config.min_chunk_chars)
            .iter()
            .map(|piece| piece.trim())
            .filter(|piece| piece.chars().count() >= self.config.min_chunk_len_to_embed)
            .enumerate()
            .map(|(seq, piece)| Chunk {
                id: chunk_id(source, page, seq),
                text: piece.to_owned(),
                metadata: metadata.clone(),
            })
            .collect()
    }

    /// Split every page of every document, stopping at `max_chunks`.
    ///
    /// Hitting the cap is not an error: the overflow is dropped and logged.
    #[must_use]
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for document in documents {
            for page in &document.pages {
                let page_chunks = self.split(&page.text, &document.page_metadata(page));
                let remaining = self.config.max_chunks.saturating_sub(chunks.len());
                if page_chunks.len() > remaining {
                    chunks.extend(page_chunks.into_iter().take(remaining));
                    tracing::warn!(
                        max_chunks = self.config.max_chunks,
                        source = %document.source_file,
                        page = page.page_number,
                        "chunk limit reached, remaining input was not indexed"
                    );
                    return chunks;
                }
                chunks.extend(page_chunks);
            }
        }
        chunks
    }
}

/// Deterministic chunk id for a position within a page.
#[must_use]
pub fn chunk_id(source_file: &str, page_number: &str, seq: usize) -> String {
    let key = format!("{source_file}:{page_number}:{seq}");
    uuid::Uuid::new_v5(&CHUNK_NAMESPACE, key.as_bytes()).to_string()
}

/// Cut `text` into contiguous slices of at most `window_chars` characters.
///
/// Each cut lands on a whitespace character at or before the window end. A
/// whitespace that follows sentence punctuation or is a newline wins when the
/// resulting piece is longer than `min_chars`. A window with no whitespace at all
/// is cut at its end.
fn split_at_whitespace(text: &str, window_chars: usize, min_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some((window_end, _)) = rest.char_indices().nth(window_chars) else {
            pieces.push(rest);
            break;
        };
        let cut = find_cut(rest, window_end, min_chars);
        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }

    pieces
}

fn find_cut(rest: &str, window_end: usize, min_chars: usize) -> usize {
    let mut last_space = None;
    let mut last_sentence_end = None;
    let mut prev = None;

    for (len, (idx, ch)) in rest.char_indices().enumerate() {
        if idx > window_end {
            break;
        }
        if idx > 0 && ch.is_whitespace() {
            last_space = Some(idx);
            if len > min_chars && (ch == '\n' || matches!(prev, Some('.' | '?' | '!'))) {
                last_sentence_end = Some(idx);
            }
        }
        prev = Some(ch);
    }

    last_sentence_end.or(last_space).unwrap_or(window_end)
}

/// Glue every piece whose trimmed length is below `min_chars` onto the piece after
/// it. The last piece is always emitted.
fn merge_short_pieces(pieces: &[&str], min_chars: usize) -> Vec<String> {
    let mut merged = Vec::with_capacity(pieces.len());
    let mut pending = String::new();
    let last = pieces.len().saturating_sub(1);

    for (idx, piece) in pieces.iter().enumerate() {
        pending.push_str(piece);
        if idx == last || pending.trim().chars().count() >= min_chars {
            merged.push(std::mem::take(&mut pending));
        }
    }

    merged
}
