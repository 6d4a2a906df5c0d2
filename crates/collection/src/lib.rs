//! ReaderShelf Collection Management
//!
//! High-level orchestration layer over core and database. Provides the
//! per-reader book collection: adding and removing books (with shared
//! catalog deduplication by ISBN), reading progress updates, and the
//! vocabulary word and quote sub-collections kept under each book copy.
//!
//! Every operation takes the acting reader's id as an explicit parameter;
//! authentication lives in an outer transport layer and never leaks in here.

pub mod error;
pub mod manager;
pub mod quotes;
pub mod requests;
pub mod words;

pub use error::{CollectionError, Result};
pub use manager::{CollectionManager, ReaderBookView, ReaderProfile};
pub use requests::{BookRequest, QuoteRequest, ReaderBookPatch, WordRequest};

/// Collection configuration
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    /// Database file path
    pub database_path: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            database_path: "readershelf.db".to_string(),
            max_connections: 5,
        }
    }
}

impl CollectionConfig {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
