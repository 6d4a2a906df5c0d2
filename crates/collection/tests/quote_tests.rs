//! Integration tests for the quote sub-collection

use readershelf_collection::{
    BookRequest, CollectionConfig, CollectionError, CollectionManager, QuoteRequest,
};
use readershelf_core::{BookId, ErrorKind, QuoteId, ReaderId};
use readershelf_database::queries::quotes::list_quotes_for_association;
use readershelf_database::queries::readers::{create_reader, NewReader};
use tempfile::NamedTempFile;

async fn setup() -> (CollectionManager, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path().to_str().unwrap().to_string();

    let manager = CollectionManager::new(CollectionConfig::new(path))
        .await
        .unwrap();
    (manager, temp_file)
}

async fn seed_reader(manager: &CollectionManager, username: &str) -> ReaderId {
    create_reader(
        manager.pool(),
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

async fn seed_book(manager: &CollectionManager, reader_id: ReaderId) -> BookId {
    manager
        .add_book(
            reader_id,
            &BookRequest {
                title: "Slaughterhouse-Five".to_string(),
                subtitle: None,
                description: None,
                isbn: "9780385333849".to_string(),
                pages_count: Some(275),
                image_link: None,
                printing_type: None,
                publishing_year: Some(1969),
                author_full_name: "Kurt Vonnegut".to_string(),
                category_name: "Science Fiction".to_string(),
                publisher_name: "Dial Press".to_string(),
            },
        )
        .await
        .unwrap();

    manager.list_books(reader_id).await.unwrap()[0].id
}

fn quote_request(content: &str) -> QuoteRequest {
    QuoteRequest {
        content: content.to_string(),
        page_number: Some(2),
    }
}

#[tokio::test]
async fn test_add_and_get_quote() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;

    let quote = manager
        .add_quote(reader_id, book_id, &quote_request("So it goes."))
        .await
        .unwrap();

    let found = manager
        .get_quote(reader_id, book_id, quote.id)
        .await
        .unwrap();
    assert_eq!(found.content, "So it goes.");
    assert_eq!(found.page_number, Some(2));
}

#[tokio::test]
async fn test_duplicate_quote_content_is_allowed() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;

    manager
        .add_quote(reader_id, book_id, &quote_request("So it goes."))
        .await
        .unwrap();
    manager
        .add_quote(reader_id, book_id, &quote_request("So it goes."))
        .await
        .unwrap();

    let quotes = manager.list_quotes(reader_id, book_id).await.unwrap();
    assert_eq!(quotes.len(), 2);
}

#[tokio::test]
async fn test_missing_quote_is_not_found() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;
    let ghost = QuoteId::from_i64(999);

    let err = manager
        .get_quote(reader_id, book_id, ghost)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, CollectionError::QuoteNotFound(_)));

    let err = manager
        .update_quote(reader_id, book_id, ghost, &quote_request("..."))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = manager
        .delete_quote(reader_id, book_id, ghost)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_update_quote() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;

    let quote = manager
        .add_quote(reader_id, book_id, &quote_request("draft"))
        .await
        .unwrap();

    let updated = manager
        .update_quote(
            reader_id,
            book_id,
            quote.id,
            &QuoteRequest {
                content: "Everything was beautiful and nothing hurt.".to_string(),
                page_number: Some(122),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.content, "Everything was beautiful and nothing hurt.");
    assert_eq!(updated.page_number, Some(122));
}

#[tokio::test]
async fn test_delete_quote() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;

    let quote = manager
        .add_quote(reader_id, book_id, &quote_request("So it goes."))
        .await
        .unwrap();

    let message = manager
        .delete_quote(reader_id, book_id, quote.id)
        .await
        .unwrap();
    assert_eq!(message, "You've successfully deleted the quote.");

    assert!(manager
        .list_quotes(reader_id, book_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_deleting_the_book_removes_its_quotes() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let book_id = seed_book(&manager, reader_id).await;

    manager
        .add_quote(reader_id, book_id, &quote_request("So it goes."))
        .await
        .unwrap();
    manager.delete_book(reader_id, book_id).await.unwrap();

    let leftovers = list_quotes_for_association(manager.pool(), reader_id, book_id)
        .await
        .unwrap();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_quote_operations_need_the_book_in_collection() {
    let (manager, _temp) = setup().await;
    let reader_id = seed_reader(&manager, "alice").await;
    let ghost_book = BookId::from_i64(999);

    let err = manager
        .add_quote(reader_id, ghost_book, &quote_request("So it goes."))
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::BookNotInCollection(_)));
}
