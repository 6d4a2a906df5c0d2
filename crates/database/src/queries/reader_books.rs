//! Reader-book association database operations
//!
//! The association is addressed by its composite key (reader_id, book_id),
//! which is also the table's primary key. The service layer checks for an
//! existing association before inserting; the primary key remains the
//! backstop under concurrent adds, surfacing as a Conflict here rather than
//! a generic storage error.

use readershelf_core::{AppError, BookId, ReaderBook, ReaderId, ReadingStatus, Timestamp};
use sqlx::sqlite::SqliteExecutor;

/// Creates a new association
pub async fn create_reader_book(
    executor: impl SqliteExecutor<'_>,
    reader_book: &ReaderBook,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO reader_books (reader_id, book_id, status, adding_date, left_off_page)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(reader_book.reader_id.as_i64())
    .bind(reader_book.book_id.as_i64())
    .bind(reader_book.status.as_str())
    .bind(reader_book.adding_date.as_millis())
    .bind(reader_book.left_off_page)
    .execute(executor)
    .await
    .map_err(|e| {
        if crate::queries::is_unique_violation(&e) {
            AppError::already_exists(
                "ReaderBook",
                format!(
                    "reader {} already owns book {}",
                    reader_book.reader_id, reader_book.book_id
                ),
            )
        } else {
            AppError::database("Failed to create reader book", e)
        }
    })?;

    Ok(())
}

/// Finds an association by its composite key, if present
pub async fn find_reader_book(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<Option<ReaderBook>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT reader_id, book_id, status, adding_date, left_off_page
        FROM reader_books WHERE reader_id = ? AND book_id = ?
        "#,
    )
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch reader book", e))?;

    row.map(row_to_reader_book).transpose()
}

/// Returns true if the association exists
pub async fn reader_book_exists(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reader_books WHERE reader_id = ? AND book_id = ?",
    )
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::database("Failed to check reader book existence", e))?;

    Ok(count > 0)
}

/// Lists all associations for a reader, in storage order
pub async fn list_reader_books(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
) -> Result<Vec<ReaderBook>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT reader_id, book_id, status, adding_date, left_off_page
        FROM reader_books WHERE reader_id = ?
        "#,
    )
    .bind(reader_id.as_i64())
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::database("Failed to list reader books", e))?;

    rows.into_iter().map(row_to_reader_book).collect()
}

/// Overwrites the mutable association fields (status, left-off page)
///
/// `adding_date` is immutable after creation and deliberately not written.
pub async fn update_reader_book(
    executor: impl SqliteExecutor<'_>,
    reader_book: &ReaderBook,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE reader_books SET status = ?, left_off_page = ?
        WHERE reader_id = ? AND book_id = ?
        "#,
    )
    .bind(reader_book.status.as_str())
    .bind(reader_book.left_off_page)
    .bind(reader_book.reader_id.as_i64())
    .bind(reader_book.book_id.as_i64())
    .execute(executor)
    .await
    .map_err(|e| AppError::database("Failed to update reader book", e))?;

    Ok(())
}

/// Deletes an association; its words and quotes cascade
pub async fn delete_reader_book(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM reader_books WHERE reader_id = ? AND book_id = ?")
        .bind(reader_id.as_i64())
        .bind(book_id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to delete reader book", e))?;

    Ok(())
}

/// Counts how many readers still reference a catalog book
///
/// Always computed fresh from storage; the orphan-cleanup decision must
/// never rely on a cached counter.
pub async fn count_readers_for_book(
    executor: impl SqliteExecutor<'_>,
    book_id: BookId,
) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reader_books WHERE book_id = ?")
        .bind(book_id.as_i64())
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::database("Failed to count readers for book", e))
}

pub(crate) fn row_to_reader_book(row: sqlx::sqlite::SqliteRow) -> Result<ReaderBook, AppError> {
    use sqlx::Row;

    let reader_id: i64 = row
        .try_get("reader_id")
        .map_err(|e| AppError::database("Missing reader ID", e))?;
    let book_id: i64 = row
        .try_get("book_id")
        .map_err(|e| AppError::database("Missing book ID", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| AppError::database("Missing status", e))?;
    let status = status_str
        .parse::<ReadingStatus>()
        .map_err(|_| AppError::invalid_input("status", format!("unknown value '{}'", status_str)))?;
    let adding_date_ms: i64 = row
        .try_get("adding_date")
        .map_err(|e| AppError::database("Missing adding date", e))?;

    Ok(ReaderBook {
        reader_id: ReaderId::from_i64(reader_id),
        book_id: BookId::from_i64(book_id),
        status,
        adding_date: Timestamp::from_millis(adding_date_ms),
        left_off_page: row.try_get::<Option<i64>, _>("left_off_page").ok().flatten(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{create_test_db, DbPool};
    use crate::migrations::run_migrations;
    use crate::queries::books::{create_book, NewBook};
    use crate::queries::catalog::{
        find_or_create_author, find_or_create_category, find_or_create_publisher,
    };
    use crate::queries::readers::{create_reader, NewReader};
    use readershelf_core::Book;

    async fn setup() -> DbPool {
        let pool = create_test_db().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_reader(pool: &DbPool, username: &str) -> ReaderId {
        create_reader(
            pool,
            &NewReader {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn seed_book(pool: &DbPool, isbn: &str) -> Book {
        let mut conn = pool.acquire().await.unwrap();
        let author = find_or_create_author(&mut conn, "Author").await.unwrap();
        let category = find_or_create_category(&mut conn, "Category").await.unwrap();
        let publisher = find_or_create_publisher(&mut conn, "Publisher")
            .await
            .unwrap();
        drop(conn);

        create_book(
            pool,
            &NewBook {
                title: "Seeded".to_string(),
                subtitle: None,
                description: None,
                isbn: isbn.to_string(),
                pages_count: None,
                image_link: None,
                printing_type: None,
                publishing_year: None,
                author_id: author.id,
                category_id: category.id,
                publisher_id: publisher.id,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_association() {
        let pool = setup().await;
        let reader_id = seed_reader(&pool, "r1").await;
        let book = seed_book(&pool, "isbn-1").await;

        let rb = ReaderBook::new(reader_id, book.id);
        create_reader_book(&pool, &rb).await.unwrap();

        let found = find_reader_book(&pool, reader_id, book.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.status, ReadingStatus::Unread);
        assert_eq!(found.adding_date, rb.adding_date);
    }

    #[tokio::test]
    async fn test_duplicate_association_is_conflict() {
        let pool = setup().await;
        let reader_id = seed_reader(&pool, "r1").await;
        let book = seed_book(&pool, "isbn-1").await;

        create_reader_book(&pool, &ReaderBook::new(reader_id, book.id))
            .await
            .unwrap();
        let result = create_reader_book(&pool, &ReaderBook::new(reader_id, book.id)).await;

        assert!(matches!(result, Err(AppError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_adding_date() {
        let pool = setup().await;
        let reader_id = seed_reader(&pool, "r1").await;
        let book = seed_book(&pool, "isbn-1").await;

        let mut rb = ReaderBook::new(reader_id, book.id);
        create_reader_book(&pool, &rb).await.unwrap();

        rb.status = ReadingStatus::Reading;
        rb.left_off_page = Some(42);
        rb.adding_date = Timestamp::from_millis(0); // must be ignored by the update
        update_reader_book(&pool, &rb).await.unwrap();

        let found = find_reader_book(&pool, reader_id, book.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.status, ReadingStatus::Reading);
        assert_eq!(found.left_off_page, Some(42));
        assert_ne!(found.adding_date.as_millis(), 0);
    }

    #[tokio::test]
    async fn test_count_readers_for_book() {
        let pool = setup().await;
        let r1 = seed_reader(&pool, "r1").await;
        let r2 = seed_reader(&pool, "r2").await;
        let book = seed_book(&pool, "isbn-1").await;

        assert_eq!(count_readers_for_book(&pool, book.id).await.unwrap(), 0);

        create_reader_book(&pool, &ReaderBook::new(r1, book.id))
            .await
            .unwrap();
        create_reader_book(&pool, &ReaderBook::new(r2, book.id))
            .await
            .unwrap();
        assert_eq!(count_readers_for_book(&pool, book.id).await.unwrap(), 2);

        delete_reader_book(&pool, r1, book.id).await.unwrap();
        assert_eq!(count_readers_for_book(&pool, book.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_reader_books() {
        let pool = setup().await;
        let reader_id = seed_reader(&pool, "r1").await;
        let book1 = seed_book(&pool, "isbn-1").await;
        let book2 = seed_book(&pool, "isbn-2").await;

        create_reader_book(&pool, &ReaderBook::new(reader_id, book1.id))
            .await
            .unwrap();
        create_reader_book(&pool, &ReaderBook::new(reader_id, book2.id))
            .await
            .unwrap();

        let books = list_reader_books(&pool, reader_id).await.unwrap();
        assert_eq!(books.len(), 2);
    }
}
