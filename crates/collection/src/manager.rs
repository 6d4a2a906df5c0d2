//! Collection manager
//!
//! Orchestrates the per-reader book collection over the storage layer.
//! Check-then-act flows (the two-path add, the delete with orphan cleanup)
//! run inside a single transaction so the database uniqueness rules stay a
//! backstop rather than the primary mechanism.

use crate::error::{CollectionError, Result};
use crate::requests::{BookRequest, ReaderBookPatch};
pub use crate::CollectionConfig;
use log::info;
use readershelf_core::{
    AppError, Book, BookId, Quote, ReaderBook, ReaderId, ReadingStatus, Timestamp, Word,
};
use readershelf_database::{
    connection::{connect, DatabaseConfig},
    migrations::run_migrations,
    queries::{books, catalog, quotes, reader_books, readers, words},
    DbPool,
};
use serde::Serialize;

/// A reader's copy of a book, flattened for the caller
///
/// Joins the shared catalog fields with the per-reader association state
/// and the sub-collections kept under it. Catalog references are resolved
/// to display names; ids of other readers never appear.
#[derive(Debug, Clone, Serialize)]
pub struct ReaderBookView {
    pub id: BookId,
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
    pub status: ReadingStatus,
    pub adding_date: Timestamp,
    pub left_off_page: Option<i64>,
    pub words: Vec<Word>,
    pub quotes: Vec<Quote>,
}

/// Public profile of a reader; credentials never leave this layer
#[derive(Debug, Clone, Serialize)]
pub struct ReaderProfile {
    pub id: ReaderId,
    pub username: String,
    pub email: String,
    pub enabled: bool,
}

/// High-level collection management
pub struct CollectionManager {
    pool: DbPool,
    #[allow(dead_code)]
    config: CollectionConfig,
}

impl CollectionManager {
    /// Create a new collection manager
    pub async fn new(config: CollectionConfig) -> Result<Self> {
        info!(
            "Initializing collection with database: {}",
            config.database_path
        );

        let db_config =
            DatabaseConfig::new(&config.database_path).with_max_connections(config.max_connections);
        let pool = connect(db_config).await?;

        run_migrations(&pool).await?;

        Ok(Self { pool, config })
    }

    /// Access the underlying pool (mainly for tests and maintenance tasks)
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Get a reader's public profile
    pub async fn reader_profile(&self, reader_id: ReaderId) -> Result<ReaderProfile> {
        let reader = readers::get_reader(&self.pool, reader_id)
            .await
            .map_err(|e| reader_missing(e, reader_id))?;

        Ok(ReaderProfile {
            id: reader.id,
            username: reader.username,
            email: reader.email,
            enabled: reader.enabled,
        })
    }

    /// List all books in a reader's collection
    pub async fn list_books(&self, reader_id: ReaderId) -> Result<Vec<ReaderBookView>> {
        self.require_reader(reader_id).await?;

        let associations = reader_books::list_reader_books(&self.pool, reader_id).await?;
        let mut views = Vec::with_capacity(associations.len());
        for association in &associations {
            views.push(self.project(association).await?);
        }
        Ok(views)
    }

    /// Get one book from a reader's collection
    pub async fn get_book(&self, reader_id: ReaderId, book_id: BookId) -> Result<ReaderBookView> {
        self.require_reader(reader_id).await?;

        let association = reader_books::find_reader_book(&self.pool, reader_id, book_id)
            .await?
            .ok_or(CollectionError::BookNotInCollection(book_id))?;

        self.project(&association).await
    }

    /// Add a book to a reader's collection
    ///
    /// Two paths keyed on ISBN: an unseen ISBN creates the catalog book
    /// (resolving author, category, and publisher by name first); a known
    /// ISBN only links the existing book. Either way the reader ends up
    /// with exactly one association, or a Conflict if they already had one.
    pub async fn add_book(&self, reader_id: ReaderId, request: &BookRequest) -> Result<String> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to begin transaction", e))?;

        readers::get_reader(&mut *tx, reader_id)
            .await
            .map_err(|e| reader_missing(e, reader_id))?;

        let message = match books::find_book_by_isbn(&mut *tx, &request.isbn).await? {
            None => {
                let author = catalog::find_or_create_author(&mut tx, &request.author_full_name).await?;
                let category = catalog::find_or_create_category(&mut tx, &request.category_name).await?;
                let publisher =
                    catalog::find_or_create_publisher(&mut tx, &request.publisher_name).await?;

                let book = books::create_book(
                    &mut *tx,
                    &books::NewBook {
                        title: request.title.clone(),
                        subtitle: request.subtitle.clone(),
                        description: request.description.clone(),
                        isbn: request.isbn.clone(),
                        pages_count: request.pages_count,
                        image_link: request.image_link.clone(),
                        printing_type: request.printing_type.clone(),
                        publishing_year: request.publishing_year,
                        author_id: author.id,
                        category_id: category.id,
                        publisher_id: publisher.id,
                    },
                )
                .await?;

                reader_books::create_reader_book(&mut *tx, &ReaderBook::new(reader_id, book.id))
                    .await?;

                info!("Created book {} for reader {}", book.id, reader_id);
                "We've successfully created the book and added it to your books."
            }
            Some(book) => {
                if reader_books::reader_book_exists(&mut *tx, reader_id, book.id).await? {
                    return Err(CollectionError::BookAlreadyInCollection(book.id));
                }

                reader_books::create_reader_book(&mut *tx, &ReaderBook::new(reader_id, book.id))
                    .await?;

                info!("Linked existing book {} to reader {}", book.id, reader_id);
                "This book already exists in the database. We've added it to your books."
            }
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to commit transaction", e))?;

        Ok(message.to_string())
    }

    /// Update a reader's copy of a book (reading status, left-off page)
    pub async fn update_book(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        patch: &ReaderBookPatch,
    ) -> Result<ReaderBookView> {
        self.require_reader(reader_id).await?;

        let mut association = reader_books::find_reader_book(&self.pool, reader_id, book_id)
            .await?
            .ok_or(CollectionError::BookNotInCollection(book_id))?;

        association.status = patch
            .status
            .parse::<ReadingStatus>()
            .map_err(|_| CollectionError::InvalidStatus(patch.status.clone()))?;
        association.left_off_page = patch.left_off_page;

        reader_books::update_reader_book(&self.pool, &association).await?;

        self.project(&association).await
    }

    /// Remove a book from a reader's collection
    ///
    /// Deletes the association (words and quotes cascade). When no other
    /// reader still references the catalog book, the book row is removed
    /// as well; the count is taken inside the same transaction.
    pub async fn delete_book(&self, reader_id: ReaderId, book_id: BookId) -> Result<String> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to begin transaction", e))?;

        readers::get_reader(&mut *tx, reader_id)
            .await
            .map_err(|e| reader_missing(e, reader_id))?;

        reader_books::find_reader_book(&mut *tx, reader_id, book_id)
            .await?
            .ok_or(CollectionError::BookNotInCollection(book_id))?;

        reader_books::delete_reader_book(&mut *tx, reader_id, book_id).await?;

        if reader_books::count_readers_for_book(&mut *tx, book_id).await? == 0 {
            books::delete_book(&mut *tx, book_id).await?;
            info!("Deleted orphaned book {}", book_id);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to commit transaction", e))?;

        Ok("Book deleted successfully.".to_string())
    }

    /// Fails with ReaderNotFound unless the reader row exists
    pub(crate) async fn require_reader(&self, reader_id: ReaderId) -> Result<()> {
        readers::get_reader(&self.pool, reader_id)
            .await
            .map(|_| ())
            .map_err(|e| reader_missing(e, reader_id))
    }

    /// Fails with BookNotInCollection unless the association exists
    pub(crate) async fn require_association(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
    ) -> Result<ReaderBook> {
        reader_books::find_reader_book(&self.pool, reader_id, book_id)
            .await?
            .ok_or(CollectionError::BookNotInCollection(book_id))
    }

    /// Flattens an association into a view, resolving catalog names and
    /// loading the word and quote sub-collections
    async fn project(&self, association: &ReaderBook) -> Result<ReaderBookView> {
        let book = books::get_book(&self.pool, association.book_id).await?;
        let (author, category, publisher) = self.resolve_catalog(&book).await?;

        let word_list =
            words::list_words_for_association(&self.pool, association.reader_id, association.book_id)
                .await?;
        let quote_list = quotes::list_quotes_for_association(
            &self.pool,
            association.reader_id,
            association.book_id,
        )
        .await?;

        Ok(ReaderBookView {
            id: book.id,
            title: book.title,
            subtitle: book.subtitle,
            description: book.description,
            isbn: book.isbn,
            pages_count: book.pages_count,
            image_link: book.image_link,
            printing_type: book.printing_type,
            publishing_year: book.publishing_year,
            author_full_name: author,
            category_name: category,
            publisher_name: publisher,
            status: association.status,
            adding_date: association.adding_date,
            left_off_page: association.left_off_page,
            words: word_list,
            quotes: quote_list,
        })
    }

    async fn resolve_catalog(&self, book: &Book) -> Result<(String, String, String)> {
        let author = catalog::get_author(&self.pool, book.author_id).await?;
        let category = catalog::get_category(&self.pool, book.category_id).await?;
        let publisher = catalog::get_publisher(&self.pool, book.publisher_id).await?;
        Ok((author.full_name, category.name, publisher.name))
    }
}

/// Maps a missing reader row onto the user-facing variant; other storage
/// errors pass through untouched
pub(crate) fn reader_missing(err: AppError, reader_id: ReaderId) -> CollectionError {
    match err {
        AppError::RecordNotFound { .. } => CollectionError::ReaderNotFound(reader_id),
        other => CollectionError::Database(other),
    }
}
