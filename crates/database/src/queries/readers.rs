//! Reader database operations

use readershelf_core::{AppError, Reader, ReaderId, Timestamp};
use sqlx::sqlite::SqliteExecutor;

/// Payload for inserting a reader row
///
/// Registration itself (credential hashing, verification mail) happens in an
/// external collaborator; this is only the storage write.
#[derive(Debug, Clone)]
pub struct NewReader {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Creates a new reader, disabled until verification
pub async fn create_reader(
    executor: impl SqliteExecutor<'_>,
    new_reader: &NewReader,
) -> Result<Reader, AppError> {
    let created_at = Timestamp::now();

    let result = sqlx::query(
        r#"
        INSERT INTO readers (username, email, password_hash, enabled, created_at)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(&new_reader.username)
    .bind(&new_reader.email)
    .bind(&new_reader.password_hash)
    .bind(created_at.as_millis())
    .execute(executor)
    .await
    .map_err(|e| {
        if crate::queries::is_unique_violation(&e) {
            AppError::already_exists("Reader", &new_reader.username)
        } else {
            AppError::database("Failed to create reader", e)
        }
    })?;

    Ok(Reader {
        id: ReaderId::from_i64(result.last_insert_rowid()),
        username: new_reader.username.clone(),
        email: new_reader.email.clone(),
        password_hash: new_reader.password_hash.clone(),
        enabled: false,
        created_at,
    })
}

/// Gets a reader by id
pub async fn get_reader(
    executor: impl SqliteExecutor<'_>,
    id: ReaderId,
) -> Result<Reader, AppError> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, enabled, created_at FROM readers WHERE id = ?",
    )
    .bind(id.as_i64())
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch reader", e))?
    .ok_or_else(|| AppError::not_found("Reader", id))?;

    row_to_reader(row)
}

/// Enables or disables a reader (flipped by the verification collaborator)
pub async fn set_reader_enabled(
    executor: impl SqliteExecutor<'_>,
    id: ReaderId,
    enabled: bool,
) -> Result<(), AppError> {
    sqlx::query("UPDATE readers SET enabled = ? WHERE id = ?")
        .bind(enabled as i64)
        .bind(id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to update reader", e))?;

    Ok(())
}

/// Deletes a reader; associations and their words/quotes cascade
pub async fn delete_reader(executor: impl SqliteExecutor<'_>, id: ReaderId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM readers WHERE id = ?")
        .bind(id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to delete reader", e))?;

    Ok(())
}

pub(crate) fn row_to_reader(row: sqlx::sqlite::SqliteRow) -> Result<Reader, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing reader ID", e))?;
    let enabled: i64 = row
        .try_get("enabled")
        .map_err(|e| AppError::database("Missing enabled flag", e))?;
    let created_at_ms: i64 = row
        .try_get("created_at")
        .map_err(|e| AppError::database("Missing created_at", e))?;

    Ok(Reader {
        id: ReaderId::from_i64(id),
        username: row
            .try_get("username")
            .map_err(|e| AppError::database("Missing username", e))?,
        email: row
            .try_get("email")
            .map_err(|e| AppError::database("Missing email", e))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| AppError::database("Missing password hash", e))?,
        enabled: enabled != 0,
        created_at: Timestamp::from_millis(created_at_ms),
    })
}
