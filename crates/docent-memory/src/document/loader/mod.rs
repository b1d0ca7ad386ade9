mod text;
pub use text::TextLoader;

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

use std::path::Path;

use super::{DocumentError, DocumentLoader};

/// Pick a loader by file extension. Anything that is not a PDF is read as text.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFormat`] for PDFs when the `pdf` feature is disabled.
pub fn loader_for_path(path: &Path) -> Result<Box<dyn DocumentLoader>, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        #[cfg(feature = "pdf")]
        "pdf" => Ok(Box::new(PdfLoader::default())),
        #[cfg(not(feature = "pdf"))]
        "pdf" => Err(DocumentError::UnsupportedFormat(format!(
            "{} (rebuild with the `pdf` feature)",
            path.display()
        ))),
        _ => Ok(Box::new(TextLoader::default())),
    }
}
