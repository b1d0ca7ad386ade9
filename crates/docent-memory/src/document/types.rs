use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chunk metadata. Ordered so persisted snapshots are byte-for-byte reproducible.
pub type Metadata = BTreeMap<String, String>;

pub const META_SOURCE_FILE: &str = "source_file";
pub const META_PAGE_NUMBER: &str = "page_number";

/// One page of extracted text. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub text: String,
    pub page_number: u32,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub source_file: String,
    pub content_type: String,
    pub pages: Vec<Page>,
}

impl Document {
    #[must_use]
    pub fn page_metadata(&self, page: &Page) -> Metadata {
        page_metadata(&self.source_file, page.page_number)
    }
}

/// Build the minimum metadata every chunk carries.
#[must_use]
pub fn page_metadata(source_file: &str, page_number: u32) -> Metadata {
    Metadata::from([
        (META_SOURCE_FILE.to_owned(), source_file.to_owned()),
        (META_PAGE_NUMBER.to_owned(), page_number.to_string()),
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub metadata: Metadata,
}

impl Chunk {
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.metadata.get(META_SOURCE_FILE).map(String::as_str)
    }

    #[must_use]
    pub fn page_number(&self) -> Option<&str> {
        self.metadata.get(META_PAGE_NUMBER).map(String::as_str)
    }
}
