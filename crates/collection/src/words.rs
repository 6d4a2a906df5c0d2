//! Vocabulary word operations
//!
//! Words live under a reader's copy of a book. Every operation resolves
//! the reader, then the association, then the word, in that order, so a
//! caller can never reach a word through a copy they don't own. Content
//! is unique per copy (case-sensitive); the same word may exist under
//! other copies untouched.

use crate::error::{CollectionError, Result};
use crate::manager::{reader_missing, CollectionManager};
use crate::requests::WordRequest;
use log::info;
use readershelf_core::{AppError, BookId, ReaderId, Word, WordId};
use readershelf_database::queries::{reader_books, readers, words};

impl CollectionManager {
    /// List all words under a reader's copy of a book
    pub async fn list_words(&self, reader_id: ReaderId, book_id: BookId) -> Result<Vec<Word>> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        Ok(words::list_words_for_association(self.pool(), reader_id, book_id).await?)
    }

    /// Get one word from a reader's copy of a book
    pub async fn get_word(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        word_id: WordId,
    ) -> Result<Word> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        words::find_word_in_association(self.pool(), word_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::WordNotFound(word_id))
    }

    /// Add a word under a reader's copy of a book
    ///
    /// The existence check and the insert share one transaction; the unique
    /// index on (reader, book, content) backstops concurrent adds.
    pub async fn add_word(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        request: &WordRequest,
    ) -> Result<Word> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to begin transaction", e))?;

        readers::get_reader(&mut *tx, reader_id)
            .await
            .map_err(|e| reader_missing(e, reader_id))?;

        reader_books::find_reader_book(&mut *tx, reader_id, book_id)
            .await?
            .ok_or(CollectionError::BookNotInCollection(book_id))?;

        if words::word_content_exists(&mut *tx, reader_id, book_id, &request.word_content).await? {
            return Err(CollectionError::WordAlreadyExists(
                request.word_content.clone(),
            ));
        }

        let word = words::create_word(
            &mut *tx,
            &words::NewWord {
                reader_id,
                book_id,
                word_content: request.word_content.clone(),
                translation: request.translation.clone(),
                related_sentence: request.related_sentence.clone(),
                page_number: request.page_number,
            },
        )
        .await
        .map_err(|e| match e {
            AppError::AlreadyExists { .. } => {
                CollectionError::WordAlreadyExists(request.word_content.clone())
            }
            other => CollectionError::Database(other),
        })?;

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to commit transaction", e))?;

        info!(
            "Added word {} under book {} for reader {}",
            word.id, book_id, reader_id
        );
        Ok(word)
    }

    /// Update a word under a reader's copy of a book
    pub async fn update_word(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        word_id: WordId,
        request: &WordRequest,
    ) -> Result<Word> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        let mut word = words::find_word_in_association(self.pool(), word_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::WordNotFound(word_id))?;

        word.word_content = request.word_content.clone();
        word.translation = request.translation.clone();
        word.related_sentence = request.related_sentence.clone();
        word.page_number = request.page_number;

        words::update_word(self.pool(), &word).await.map_err(|e| match e {
            AppError::AlreadyExists { .. } => {
                CollectionError::WordAlreadyExists(word.word_content.clone())
            }
            other => CollectionError::Database(other),
        })?;

        Ok(word)
    }

    /// Delete a word from a reader's copy of a book
    pub async fn delete_word(
        &self,
        reader_id: ReaderId,
        book_id: BookId,
        word_id: WordId,
    ) -> Result<String> {
        self.require_reader(reader_id).await?;
        self.require_association(reader_id, book_id).await?;

        let word = words::find_word_in_association(self.pool(), word_id, reader_id, book_id)
            .await?
            .ok_or(CollectionError::WordNotFound(word_id))?;

        words::delete_word(self.pool(), word.id).await?;

        Ok("You've successfully deleted the word.".to_string())
    }
}
