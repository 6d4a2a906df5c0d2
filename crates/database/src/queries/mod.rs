//! Database query operations organized by entity
//!
//! Query functions accept any [`SqliteExecutor`](sqlx::sqlite::SqliteExecutor)
//! so the service layer can run multi-step check-then-act flows inside a
//! single transaction while plain reads go straight through the pool.

pub mod books;
pub mod catalog;
pub mod quotes;
pub mod reader_books;
pub mod readers;
pub mod words;

// Re-export commonly used query functions
pub use books::{create_book, delete_book, find_book_by_isbn, get_book, NewBook};
pub use catalog::{
    find_or_create_author, find_or_create_category, find_or_create_publisher, get_author,
    get_category, get_publisher,
};
pub use quotes::{
    create_quote, delete_quote, find_quote_in_association, list_quotes_for_association,
    update_quote, NewQuote,
};
pub use reader_books::{
    count_readers_for_book, create_reader_book, delete_reader_book, find_reader_book,
    list_reader_books, reader_book_exists, update_reader_book,
};
pub use readers::{create_reader, delete_reader, get_reader, set_reader_enabled, NewReader};
pub use words::{
    create_word, delete_word, find_word_in_association, list_words_for_association, update_word,
    word_content_exists, NewWord,
};

/// Returns true if the error is a storage-level uniqueness violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
