pub mod error;
pub mod loader;
pub mod pipeline;
pub mod splitter;
pub mod types;

pub use error::DocumentError;
pub use loader::{TextLoader, loader_for_path};
pub use pipeline::IngestionPipeline;
pub use splitter::{SplitterConfig, TextSplitter, chunk_id};
pub use types::{
    Chunk, Document, META_PAGE_NUMBER, META_SOURCE_FILE, Metadata, Page, page_metadata,
};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Text extraction capability: turns a source file into numbered pages.
pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &std::path::Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Document, DocumentError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}
