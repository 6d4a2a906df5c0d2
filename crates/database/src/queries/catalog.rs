//! Author, category, and publisher database operations
//!
//! The lookup-or-create helpers resolve a name to a catalog row, inserting
//! on first reference. Matching is an exact byte-for-byte comparison: no
//! case folding, no trimming. They run two statements, so they take a
//! connection rather than a bare executor; callers decide whether that
//! connection belongs to a transaction.

use readershelf_core::{AppError, Author, AuthorId, Category, CategoryId, Publisher, PublisherId};
use sqlx::sqlite::SqliteExecutor;
use sqlx::{Row, SqliteConnection};

/// Returns the existing author with the exact name, or creates one
pub async fn find_or_create_author(
    conn: &mut SqliteConnection,
    full_name: &str,
) -> Result<Author, AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM authors WHERE full_name = ?")
        .bind(full_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to look up author", e))?;

    if let Some(id) = existing {
        return Ok(Author {
            id: AuthorId::from_i64(id),
            full_name: full_name.to_string(),
        });
    }

    let result = sqlx::query("INSERT INTO authors (full_name) VALUES (?)")
        .bind(full_name)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create author", e))?;

    Ok(Author {
        id: AuthorId::from_i64(result.last_insert_rowid()),
        full_name: full_name.to_string(),
    })
}

/// Returns the existing category with the exact name, or creates one
pub async fn find_or_create_category(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Category, AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to look up category", e))?;

    if let Some(id) = existing {
        return Ok(Category {
            id: CategoryId::from_i64(id),
            name: name.to_string(),
        });
    }

    let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create category", e))?;

    Ok(Category {
        id: CategoryId::from_i64(result.last_insert_rowid()),
        name: name.to_string(),
    })
}

/// Returns the existing publisher with the exact name, or creates one
pub async fn find_or_create_publisher(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Publisher, AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM publishers WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to look up publisher", e))?;

    if let Some(id) = existing {
        return Ok(Publisher {
            id: PublisherId::from_i64(id),
            name: name.to_string(),
        });
    }

    let result = sqlx::query("INSERT INTO publishers (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database("Failed to create publisher", e))?;

    Ok(Publisher {
        id: PublisherId::from_i64(result.last_insert_rowid()),
        name: name.to_string(),
    })
}

/// Gets an author by id
pub async fn get_author(
    executor: impl SqliteExecutor<'_>,
    id: AuthorId,
) -> Result<Author, AppError> {
    let row = sqlx::query("SELECT id, full_name FROM authors WHERE id = ?")
        .bind(id.as_i64())
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::database("Failed to fetch author", e))?
        .ok_or_else(|| AppError::not_found("Author", id))?;

    Ok(Author {
        id,
        full_name: row
            .try_get("full_name")
            .map_err(|e| AppError::database("Missing author name", e))?,
    })
}

/// Gets a category by id
pub async fn get_category(
    executor: impl SqliteExecutor<'_>,
    id: CategoryId,
) -> Result<Category, AppError> {
    let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
        .bind(id.as_i64())
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::database("Failed to fetch category", e))?
        .ok_or_else(|| AppError::not_found("Category", id))?;

    Ok(Category {
        id,
        name: row
            .try_get("name")
            .map_err(|e| AppError::database("Missing category name", e))?,
    })
}

/// Gets a publisher by id
pub async fn get_publisher(
    executor: impl SqliteExecutor<'_>,
    id: PublisherId,
) -> Result<Publisher, AppError> {
    let row = sqlx::query("SELECT id, name FROM publishers WHERE id = ?")
        .bind(id.as_i64())
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::database("Failed to fetch publisher", e))?
        .ok_or_else(|| AppError::not_found("Publisher", id))?;

    Ok(Publisher {
        id,
        name: row
            .try_get("name")
            .map_err(|e| AppError::database("Missing publisher name", e))?,
    })
}
