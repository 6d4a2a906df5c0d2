//! Catalog book database operations

use readershelf_core::{AppError, AuthorId, Book, BookId, CategoryId, PublisherId};
use sqlx::sqlite::SqliteExecutor;

/// Payload for inserting a catalog book row; the id is storage-assigned
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub isbn: String,
    pub pages_count: Option<i64>,
    pub image_link: Option<String>,
    pub printing_type: Option<String>,
    pub publishing_year: Option<i64>,
    pub author_id: AuthorId,
    pub category_id: CategoryId,
    pub publisher_id: PublisherId,
}

/// Creates a new catalog book
pub async fn create_book(
    executor: impl SqliteExecutor<'_>,
    new_book: &NewBook,
) -> Result<Book, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (
            title, subtitle, description, isbn, pages_count,
            image_link, printing_type, publishing_year,
            author_id, category_id, publisher_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new_book.title)
    .bind(&new_book.subtitle)
    .bind(&new_book.description)
    .bind(&new_book.isbn)
    .bind(new_book.pages_count)
    .bind(&new_book.image_link)
    .bind(&new_book.printing_type)
    .bind(new_book.publishing_year)
    .bind(new_book.author_id.as_i64())
    .bind(new_book.category_id.as_i64())
    .bind(new_book.publisher_id.as_i64())
    .execute(executor)
    .await
    .map_err(|e| {
        if crate::queries::is_unique_violation(&e) {
            AppError::already_exists("Book", &new_book.isbn)
        } else {
            AppError::database("Failed to create book", e)
        }
    })?;

    Ok(Book {
        id: BookId::from_i64(result.last_insert_rowid()),
        title: new_book.title.clone(),
        subtitle: new_book.subtitle.clone(),
        description: new_book.description.clone(),
        isbn: new_book.isbn.clone(),
        pages_count: new_book.pages_count,
        image_link: new_book.image_link.clone(),
        printing_type: new_book.printing_type.clone(),
        publishing_year: new_book.publishing_year,
        author_id: new_book.author_id,
        category_id: new_book.category_id,
        publisher_id: new_book.publisher_id,
    })
}

/// Gets a book by id
pub async fn get_book(executor: impl SqliteExecutor<'_>, id: BookId) -> Result<Book, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, title, subtitle, description, isbn, pages_count,
               image_link, printing_type, publishing_year,
               author_id, category_id, publisher_id
        FROM books WHERE id = ?
        "#,
    )
    .bind(id.as_i64())
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch book", e))?
    .ok_or_else(|| AppError::not_found("Book", id))?;

    row_to_book(row)
}

/// Finds a book by its unique ISBN, if present in the catalog
pub async fn find_book_by_isbn(
    executor: impl SqliteExecutor<'_>,
    isbn: &str,
) -> Result<Option<Book>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, title, subtitle, description, isbn, pages_count,
               image_link, printing_type, publishing_year,
               author_id, category_id, publisher_id
        FROM books WHERE isbn = ?
        "#,
    )
    .bind(isbn)
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::database("Failed to fetch book by ISBN", e))?;

    row.map(row_to_book).transpose()
}

/// Deletes a book from the catalog
pub async fn delete_book(executor: impl SqliteExecutor<'_>, id: BookId) -> Result<(), AppError> {
    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id.as_i64())
        .execute(executor)
        .await
        .map_err(|e| AppError::database("Failed to delete book", e))?;

    Ok(())
}

pub(crate) fn row_to_book(row: sqlx::sqlite::SqliteRow) -> Result<Book, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| AppError::database("Missing book ID", e))?;
    let author_id: i64 = row
        .try_get("author_id")
        .map_err(|e| AppError::database("Missing author ID", e))?;
    let category_id: i64 = row
        .try_get("category_id")
        .map_err(|e| AppError::database("Missing category ID", e))?;
    let publisher_id: i64 = row
        .try_get("publisher_id")
        .map_err(|e| AppError::database("Missing publisher ID", e))?;

    Ok(Book {
        id: BookId::from_i64(id),
        title: row
            .try_get("title")
            .map_err(|e| AppError::database("Missing title", e))?,
        subtitle: row.try_get("subtitle").ok(),
        description: row.try_get("description").ok(),
        isbn: row
            .try_get("isbn")
            .map_err(|e| AppError::database("Missing ISBN", e))?,
        pages_count: row.try_get("pages_count").ok(),
        image_link: row.try_get("image_link").ok(),
        printing_type: row.try_get("printing_type").ok(),
        publishing_year: row.try_get("publishing_year").ok(),
        author_id: AuthorId::from_i64(author_id),
        category_id: CategoryId::from_i64(category_id),
        publisher_id: PublisherId::from_i64(publisher_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{create_test_db, DbPool};
    use crate::migrations::run_migrations;
    use crate::queries::catalog::{
        find_or_create_author, find_or_create_category, find_or_create_publisher,
    };

    async fn setup() -> DbPool {
        let pool = create_test_db().await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn test_book(pool: &DbPool, isbn: &str) -> NewBook {
        let mut conn = pool.acquire().await.unwrap();
        let author = find_or_create_author(&mut conn, "Test Author").await.unwrap();
        let category = find_or_create_category(&mut conn, "Test Category")
            .await
            .unwrap();
        let publisher = find_or_create_publisher(&mut conn, "Test Publisher")
            .await
            .unwrap();

        NewBook {
            title: "Test Book".to_string(),
            subtitle: None,
            description: None,
            isbn: isbn.to_string(),
            pages_count: Some(320),
            image_link: None,
            printing_type: Some("paperback".to_string()),
            publishing_year: Some(2020),
            author_id: author.id,
            category_id: category.id,
            publisher_id: publisher.id,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_book() {
        let pool = setup().await;
        let new_book = test_book(&pool, "9781524746742").await;

        let created = create_book(&pool, &new_book).await.unwrap();
        let retrieved = get_book(&pool, created.id).await.unwrap();

        assert_eq!(retrieved.title, "Test Book");
        assert_eq!(retrieved.isbn, "9781524746742");
        assert_eq!(retrieved.pages_count, Some(320));
    }

    #[tokio::test]
    async fn test_find_book_by_isbn() {
        let pool = setup().await;
        let new_book = test_book(&pool, "9780141439600").await;

        assert!(find_book_by_isbn(&pool, "9780141439600")
            .await
            .unwrap()
            .is_none());

        let created = create_book(&pool, &new_book).await.unwrap();
        let found = find_book_by_isbn(&pool, "9780141439600").await.unwrap();

        assert_eq!(found.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_isbn_is_conflict() {
        let pool = setup().await;
        let new_book = test_book(&pool, "9780553386790").await;

        create_book(&pool, &new_book).await.unwrap();
        let result = create_book(&pool, &new_book).await;

        assert!(matches!(result, Err(AppError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_delete_book() {
        let pool = setup().await;
        let new_book = test_book(&pool, "9780262033848").await;

        let created = create_book(&pool, &new_book).await.unwrap();
        delete_book(&pool, created.id).await.unwrap();

        let result = get_book(&pool, created.id).await;
        assert!(matches!(result, Err(AppError::RecordNotFound { .. })));
    }
}
