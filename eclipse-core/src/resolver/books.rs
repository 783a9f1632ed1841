//! Book reads: borrowed books, book details and suggestions

use super::renters::decode_strict;
use super::{RentalResolver, BOOKS, BORROWED_BOOKS, USERS};
use crate::error::{EclipseError, Result};
use crate::normalize::{fields, Normalizer};
use crate::store::subcollection;
use crate::types::{Book, RentersBook};
use tracing::{debug, info};

/// Number of book documents sampled for suggestions
const SUGGESTION_LIMIT: usize = 5;

impl RentalResolver {
    /// Books the user currently has borrowed
    ///
    /// Each `borrowedBooks` document holds a `books` array; entries that do
    /// not decode are logged and dropped. A user with no borrowed-book
    /// documents at all is reported as [`EclipseError::NotFound`].
    pub async fn fetch_currently_rented_books(&self, user_id: &str) -> Result<Vec<RentersBook>> {
        let collection = subcollection(USERS, user_id, BORROWED_BOOKS);
        let documents = self.store.list(&collection).await?;
        if documents.is_empty() {
            return Err(EclipseError::NotFound(format!(
                "no rented books found for user {}",
                user_id
            )));
        }

        let mut books = Vec::new();
        for doc in &documents {
            match fields::array(&doc.fields, "books") {
                Some(entries) => books.extend(decode_strict(entries, &doc.id)),
                None => debug!(user_id, document = %doc.id, "Borrowed-books document has no books"),
            }
        }

        info!(user_id, count = books.len(), "Fetched currently rented books");
        Ok(books)
    }

    /// A book from the `books` collection, `None` if absent or lacking an
    /// id or title
    pub async fn fetch_book_details(&self, book_id: &str) -> Result<Option<Book>> {
        let book = self
            .store
            .get(BOOKS, book_id)
            .await?
            .and_then(|doc| self.normalizer.normalize(&doc.fields));
        if book.is_none() {
            debug!(book_id, "No usable book document");
        }
        Ok(book)
    }

    /// Search API ids of a handful of stored books
    pub async fn fetch_suggested_books(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list(BOOKS)
            .await?
            .iter()
            .take(SUGGESTION_LIMIT)
            .filter_map(|doc| fields::string(&doc.fields, "googleBooksId"))
            .collect())
    }
}
