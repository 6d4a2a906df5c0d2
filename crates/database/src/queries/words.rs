//! Vocabulary word database operations
//!
//! Words are addressed by (id, owning association); every lookup carries the
//! composite key so one reader can never reach into another reader's copy.

use readershelf_core::{AppError, BookId, ReaderId, Word, WordId};
use sqlx::sqlite::SqliteExecutor;

/// Payload for inserting a word row; the id is storage-assigned
#[derive(Debug, Clone)]
pub struct NewWord {
    pub reader_id: ReaderId,
    pub book_id: BookId,
    pub word_content: String,
    pub translation: Option<String>,
    pub related_sentence: Option<String>,
    pub page_number: Option<i64>,
}

/// Creates a new word under its association
///
/// The (reader_id, book_id, word_content) unique index is the backstop for
/// the per-association content uniqueness rule, surfaced as a Conflict.
pub async fn create_word(
    executor: impl SqliteExecutor<'_>,
    new_word: &NewWord,
) -> Result<Word, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO words (reader_id, book_id, word_content, translation, related_sentence, page_number)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_word.reader_id.as_i64())
    .bind(new_word.book_id.as_i64())
    .bind(&new_word.word_content)
    .bind(&new_word.translation)
    .bind(&new_word.related_sentence)
    .bind(new_word.page_number)
    .execute(executor)
    .await
    .map_err(|e| {
        if crate::queries::is_unique_violation(&e) {
            AppError::already_exists("Word", &new_word.word_content)
        } else {
            AppError::database("Failed to create word", e)
        }
    })?;

    Ok(Word {
        id: WordId::from_i64(result.last_insert_rowid()),
        reader_id: new_word.reader_id,
        book_id: new_word.book_id,
        word_content: new_word.word_content.clone(),
        translation: new_word.translation.clone(),
        related_sentence: new_word.related_sentence.clone(),
        page_number: new_word.page_number,
    })
}

/// Returns true if the association already holds a word with this exact
/// content (case-sensitive)
pub async fn word_content_exists(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
    content: &str,
) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM words WHERE reader_id = ? AND book_id = ? AND word_content = ?",
    )
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .bind(content)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::database("Failed to check word existence", e))?;

    Ok(count > 0)
}

/// Finds a word by id scoped to its owning association, if present
pub async fn find_word_in_association(
    executor: impl SqliteExecutor<'_>,
    word_id: WordId,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<Option<Word>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, reader_id, book_id, word_content, translation, related_sentence, page_number
        FROM words WHERE id = ? AND reader_id = ? AND book_id = ?
        "#,
    )
    .bind(word_id.as_i64())
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch word", e))?;

    row.map(row_to_word).transpose()
}

/// Lists all words of an association, in storage order
pub async fn list_words_for_association(
    executor: impl SqliteExecutor<'_>,
    reader_id: ReaderId,
    book_id: BookId,
) -> Result<Vec<Word>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT id, reader_id, book_id, word_content, translation, related_sentence, page_number
        FROM words WHERE reader_id = ? AND book_id = ?
        "#,
    )
    .bind(reader_id.as_i64())
    .bind(book_id.as_i64())
    .fetch_all(executor)
    .await
    .map_err(|e| AppError::database("Failed to list words", e))?;

    rows.into_iter().map(row_to_word).collect()
}

/// Overwrites all mutable word fields
pub async fn update_word(executor: impl SqliteExecutor<'_>, word: &Word) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE words SET word_content = ?, translation = ?, related_sentence = ?, page_number = ?
        WHERE id = ?
        "#,
    )
    .bind(&word.word_content)
    .bind(&word.translation)
    .bind(&word.related_sentence)
    .bind(word.page_number)
    .bind(word.id.as_i64())
    .execute(executor)
    .await
    .map_err(|e| {
        if crate::queries::is_unique_violation(&e) {
            AppError::already_exists("Word", &word.word_content)
        } else {
            AppError::database("Failed to update word", e)
        }
    })?;

    Ok(())
}

/// Deletes a word
pub async fn delete_word(executor: impl SqliteExecutor<'_>, id: WordId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM words WHERE id = ?")
        .bind(id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to delete word", e))?;

    Ok(())
}

pub(crate) fn row_to_word(row: sqlx::sqlite::SqliteRow) -> Result<Word, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing word ID", e))?;
    let reader_id: i64 = row
        .try_get("reader_id")
        .map_err(|e| AppError::database("Missing reader ID", e))?;
    let book_id: i64 = row
        .try_get("book_id")
        .map_err(|e| AppError::database("Missing book ID", e))?;

    Ok(Word {
        id: WordId::from_i64(id),
        reader_id: ReaderId::from_i64(reader_id),
        book_id: BookId::from_i64(book_id),
        word_content: row
            .try_get("word_content")
            .map_err(|e| AppError::database("Missing word content", e))?,
        translation: row.try_get("translation").ok(),
        related_sentence: row.try_get("related_sentence").ok(),
        page_number: row.try_get("page_number").ok(),
    })
}
