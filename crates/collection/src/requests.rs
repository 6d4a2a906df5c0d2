//! Request payloads accepted by the collection manager
//!
//! These are the deserialized bodies an outer transport hands in. The
//! manager validates them; nothing here is trusted beyond its shape.

use serde::Deserialize;

/// Payload for adding a book to a reader's collection
///
/// Author, category, and publisher arrive as names; the manager resolves
/// each to a catalog row, creating it on first reference.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub isbn: String,
    pub pages_count: Option<i64>,
    pub image_link: Option<String>,
    pub printing_type: Option<String>,
    pub publishing_year: Option<i64>,
    pub author_full_name: String,
    pub category_name: String,
    pub publisher_name: String,
}

/// Payload for updating a reader's copy of a book
///
/// The status arrives as free text and is validated against the allowed
/// reading statuses, case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderBookPatch {
    pub status: String,
    pub left_off_page: Option<i64>,
}

/// Payload for adding or updating a vocabulary word
#[derive(Debug, Clone, Deserialize)]
pub struct WordRequest {
    pub word_content: String,
    pub translation: Option<String>,
    pub related_sentence: Option<String>,
    pub page_number: Option<i64>,
}

/// Payload for adding or updating a quote
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub content: String,
    pub page_number: Option<i64>,
}
