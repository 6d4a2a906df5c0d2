//! Catalog book domain model

use crate::types::{AuthorId, CategoryId, PublisherId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog book, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    /// Wraps a storage-assigned row id
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shared, deduplicated-by-ISBN record of a book's bibliographic data
///
/// A Book exists independently of any single reader's collection and is
/// referenced by every association pointing at it. It is deleted only when
/// its last owning association is removed. Author, category, and publisher
/// are held by id; the service layer resolves the names when projecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub isbn: String,
    pub pages_count: Option<i64>,
    pub image_link: Option<String>,
    pub printing_type: Option<String>,
    pub publishing_year: Option<i64>,
    pub author_id: AuthorId,
    pub category_id: CategoryId,
    pub publisher_id: PublisherId,
}
