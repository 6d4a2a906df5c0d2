//! Collection error types
//!
//! Every user-triggered failure keeps the message the caller sees; the
//! response-translation layer only looks at [`ErrorKind`] when picking a
//! status code. Missing sub-collection entries (words, quotes) are
//! not-found errors, never conflicts.

use readershelf_core::{AppError, BookId, ErrorKind, QuoteId, ReaderId, WordId};
use thiserror::Error;

/// Errors for collection operations
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Underlying storage error
    #[error(transparent)]
    Database(#[from] AppError),

    /// The acting reader no longer exists
    #[error("Looks like the reader with id: {0} has been removed from the database!")]
    ReaderNotFound(ReaderId),

    /// The reader has no association with this book
    #[error("You don't have this book in your collection!")]
    BookNotInCollection(BookId),

    /// The reader already owns a copy of this book
    #[error("You already have this book in your collection!")]
    BookAlreadyInCollection(BookId),

    /// The supplied reading status is not one of the allowed values
    #[error("Enter a valid status (UNREAD, READING, READ)! Can be lowercase.")]
    InvalidStatus(String),

    /// The book copy already holds a word with this content
    #[error("You already have this word in this book copy!")]
    WordAlreadyExists(String),

    /// No word with this id in the book copy
    #[error("Word with id: {0} doesn't exist in this book copy!")]
    WordNotFound(WordId),

    /// No quote with this id in the book copy
    #[error("Quote with id: {0} doesn't exist in this book copy!")]
    QuoteNotFound(QuoteId),
}

impl CollectionError {
    /// Returns the abstract kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(err) => err.kind(),
            Self::ReaderNotFound(_)
            | Self::BookNotInCollection(_)
            | Self::WordNotFound(_)
            | Self::QuoteNotFound(_) => ErrorKind::NotFound,
            Self::BookAlreadyInCollection(_) | Self::WordAlreadyExists(_) => ErrorKind::Conflict,
            Self::InvalidStatus(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for collection operations
pub type Result<T> = std::result::Result<T, CollectionError>;
