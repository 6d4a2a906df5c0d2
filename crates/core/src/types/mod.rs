//! Domain types for ReaderShelf
//!
//! This module contains all domain models organized by responsibility:
//! - `reader`: reader accounts
//! - `catalog`: name-keyed author/category/publisher entities
//! - `book`: shared catalog books
//! - `reader_book`: the per-reader ownership association and reading status
//! - `notes`: words and quotes owned by one association
//! - `common`: shared utilities

mod book;
mod catalog;
mod common;
mod notes;
mod reader;
mod reader_book;

// Re-export all public types
pub use book::{Book, BookId};
pub use catalog::{Author, AuthorId, Category, CategoryId, Publisher, PublisherId};
pub use common::Timestamp;
pub use notes::{Quote, QuoteId, Word, WordId};
pub use reader::{Reader, ReaderId};
pub use reader_book::{ReaderBook, ReadingStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ids_are_exported() {
        let _reader: ReaderId = ReaderId::from_i64(1);
        let _book: BookId = BookId::from_i64(1);
        let _author: AuthorId = AuthorId::from_i64(1);
        let _category: CategoryId = CategoryId::from_i64(1);
        let _publisher: PublisherId = PublisherId::from_i64(1);
        let _word: WordId = WordId::from_i64(1);
        let _quote: QuoteId = QuoteId::from_i64(1);
    }
}
