//! Word and quote domain models, scoped under one reader-book association

use crate::types::{BookId, ReaderId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a vocabulary word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordId(i64);

impl WordId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(i64);

impl QuoteId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vocabulary word extracted from one book copy
///
/// Belongs to exactly one association, addressed by (reader_id, book_id).
/// No two words in the same association may share `word_content`
/// (case-sensitive exact match).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub reader_id: ReaderId,
    pub book_id: BookId,
    pub word_content: String,
    pub translation: Option<String>,
    pub related_sentence: Option<String>,
    pub page_number: Option<i64>,
}

/// A quote saved from one book copy
///
/// Belongs to exactly one association; carries no uniqueness rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub reader_id: ReaderId,
    pub book_id: BookId,
    pub content: String,
    pub page_number: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_ids_round_trip() {
        assert_eq!(WordId::from_i64(5).as_i64(), 5);
        assert_eq!(QuoteId::from_i64(6).as_i64(), 6);
        assert_eq!(WordId::from_i64(5).to_string(), "5");
    }
}
