//! Quote database operations
//!
//! Same shape as the word queries, minus the content uniqueness rule:
//! a reader may save the same passage twice.

use readershelf_core::{AppError, BookId, Quote, QuoteId, ReaderId};
use sqlx::sqlite::SqliteExecutor;

/// Payload for inserting a quote row; the id is storage-assigned
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub reader_id: ReaderId,
    pub book_id: BookId,
    pub content: String,
    pub page_number: Option<i64>,
}

/// Creates a new quote under its association
pub async fn create_quote(
    executor: impl SqliteExecutor<'_>,
    new_quote: &NewQuote,
) -> Result<Quote, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO quotes (reader_id, book_id, content, page_number)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(new_quote.reader_id.as_i64())
    .bind(new_quote.book_id.as_i64())
    .bind(&new_quote.content)
    .bind(new_quote.page_number)
    .execute(executor)
    .await
    .map_err(|e| AppError::database("Failed to create quote", e))?;

    Ok(Quote {
        id: QuoteId::from_i64(result.last_insert_rowid()),
        reader_id: new_quote.reader_id,
        book_id: new_quote.book_id,
        content: new_quote.content.clone(),
        page_number: new_quote.page_number,
    })
}

/// Finds a quote by id scoped to its owning association, if present
pub async fn find_quote_in_association(
    executor: impl SqliteExecutor<'_>,
    quote_id: QuoteId,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<Option<Quote>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, reader_id, book_id, content, page_number
        FROM quotes WHERE id = ? AND reader_id = ? AND book_id = ?
        "#,
    )
    .bind(quote_id.as_i64())
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch quote", e))?;

    row.map(row_to_quote).transpose()
}

/// Lists all quotes of an association, in storage order
pub async fn list_quotes_for_association(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<Vec<Quote>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT id, reader_id, book_id, content, page_number
        FROM quotes WHERE reader_id = ? AND book_id = ?
        "#,
    )
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::database("Failed to list quotes", e))?;

    rows.into_iter().map(row_to_quote).collect()
}

/// Overwrites all mutable quote fields
pub async fn update_quote(executor: impl SqliteExecutor<'_>, quote: &Quote) -> Result<(), AppError> {
    sqlx::query("UPDATE quotes SET content = ?, page_number = ? WHERE id = ?")
        .bind(&quote.content)
        .bind(quote.page_number)
        .bind(quote.id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to update quote", e))?;

    Ok(())
}

/// Deletes a quote
pub async fn delete_quote(executor: impl SqliteExecutor<'_>, id: QuoteId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM quotes WHERE id = ?")
        .bind(id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to delete quote", e))?;

    Ok(())
}

pub(crate) fn row_to_quote(row: sqlx::sqlite::SqliteRow) -> Result<Quote, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing quote ID", e))?;
    let reader_id: i64 = row
        .try_get("reader_id")
        .map_err(|e| AppError::database("Missing reader ID", e))?;
    let book_id: i64 = row
        .try_get("book_id")
        .map_err(|e| AppError::database("Missing book ID", e))?;

    Ok(Quote {
        id: QuoteId::from_i64(id),
        reader_id: ReaderId::from_i64(reader_id),
        book_id: BookId::from_i64(book_id),
        content: row
            .try_get("content")
            .map_err(|e| AppError::database("Missing quote content", e))?,
        page_number: row.try_get("page_number").ok(),
    })
}
