//! Quote operations
//!
//! Same resolution chain as words (reader, association, quote), but with
//! no content uniqueness rule: saving the same passage twice is allowed.

use crate::error::{CollectionError, Result};
use crate::manager::CollectionManager;
use crate::requests::QuoteRequest;
use log::info;
use readershelf_core::{BookId, Quote, QuoteId, ReaderId};
use readershelf_database::queries::quotes;

impl CollectionManager {
    /// List all quotes under a reader's copy of a book
    pub async fn list_quotes(&self, reader_id: ReaderId, book_id: BookId) -> Result<Vec<Quote>> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        Ok(quotes::list_quotes_for_association(self.pool(), reader_id, book_id).await?)
    }

    /// Get one quote from a reader's copy of a book
    pub async fn get_quote(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        quote_id: QuoteId,
    ) -> Result<Quote> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        quotes::find_quote_in_association(self.pool(), quote_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::QuoteNotFound(quote_id))
    }

    /// Add a quote under a reader's copy of a book
    pub async fn add_quote(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        request: &QuoteRequest,
    ) -> Result<Quote> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        let quote = quotes::create_quote(
            self.pool(),
            &quotes::NewQuote {
                reader_id,
                book_id,
                content: request.content.clone(),
                page_number: request.page_number,
            },
        )
        .await?;

        info!(
            "Added quote {} under book {} for reader {}",
            quote.id, book_id, reader_id
        );
        Ok(quote)
    }

    /// Update a quote under a reader's copy of a book
    pub async fn update_quote(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        quote_id: QuoteId,
        request: &QuoteRequest,
    ) -> Result<Quote> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        let mut quote = quotes::find_quote_in_association(self.pool(), quote_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::QuoteNotFound(quote_id))?;

        quote.content = request.content.clone();
        quote.page_number = request.page_number;

        quotes::update_quote(self.pool(), &quote).await?;

        Ok(quote)
    }

    /// Delete a quote from a reader's copy of a book
    pub async fn delete_quote(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        quote_id: QuoteId,
    ) -> Result<String> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        let quote = quotes::find_quote_in_association(self.pool(), quote_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::QuoteNotFound(quote_id))?;

        quotes::delete_quote(self.pool(), quote.id).await?;

        Ok("You've successfully deleted the quote.".to_string())
    }
}
