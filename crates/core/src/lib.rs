pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorKind, Result};
pub use types::{
    Author, AuthorId, Book, BookId, Category, CategoryId, Publisher, PublisherId, Quote, QuoteId,
    Reader, ReaderBook, ReaderId, ReadingStatus, Timestamp, Word, WordId,
};
