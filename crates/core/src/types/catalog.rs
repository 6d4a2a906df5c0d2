//! Name-keyed catalog entities: authors, categories, publishers
//!
//! These rows are deduplicated by exact name match and created on first
//! reference (lookup-or-create). No case or whitespace normalization is
//! applied: two names differing only by case are distinct entities.

use serde::{Deserialize, Serialize};

/// Unique identifier for an author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(i64);

impl AuthorId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublisherId(i64);

impl PublisherId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PublisherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book author, keyed by full name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
}

/// A book category, keyed by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A book publisher, keyed by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publisher {
    pub id: PublisherId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_round_trip() {
        assert_eq!(AuthorId::from_i64(1).as_i64(), 1);
        assert_eq!(CategoryId::from_i64(2).as_i64(), 2);
        assert_eq!(PublisherId::from_i64(3).as_i64(), 3);
    }
}
