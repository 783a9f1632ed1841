//! Renter reads and writes

use super::{RentalResolver, RENTERS};
use crate::error::{DecodeError, Result, StoreError};
use crate::normalize::{fields, UNKNOWN_TITLE};
use crate::store::{Document, Fields, SetMode};
use crate::types::{Rating, RatingMap, Renter, RentersBook};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const UNKNOWN_AUTHOR: &str = "Unknown Author";
const NO_DESCRIPTION: &str = "No description available";

/// Field holding a renter's offered books
const RENTED_BOOKS: &str = "rentedBooks";

/// Field holding a renter's rating map
const RATING: &str = "rating";

/// Result of [`RentalResolver::fetch_renter_details`]
///
/// A missing document, a failed read and a missing name all surface as
/// `name: None`; callers cannot tell them apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenterDetails {
    pub name: Option<String>,
    pub rating: Option<RatingMap>,
}

impl RentalResolver {
    /// All renters in store order
    ///
    /// Documents without a `name` are skipped. Offered books are decoded
    /// leniently and never fail; a rating is attached only when all three
    /// scores are present.
    pub async fn fetch_renters(&self) -> Result<Vec<Renter>> {
        let documents = self.store.list(RENTERS).await?;
        let fetched_at = Utc::now();

        let renters: Vec<Renter> = documents
            .iter()
            .filter_map(|doc| renter_from_document(doc, fetched_at))
            .collect();

        info!(
            count = renters.len(),
            skipped = documents.len() - renters.len(),
            "Fetched renters"
        );
        Ok(renters)
    }

    /// Name and raw rating map of one renter; never fails
    pub async fn fetch_renter_details(&self, renter_id: &str) -> RenterDetails {
        match self.store.get(RENTERS, renter_id).await {
            Ok(Some(doc)) => RenterDetails {
                name: fields::string(&doc.fields, "name"),
                rating: fields::rating_map(&doc.fields, RATING),
            },
            Ok(None) => {
                debug!(renter_id, "Renter document not found");
                RenterDetails::default()
            }
            Err(e) => {
                error!(renter_id, error = %e, "Failed to fetch renter details");
                RenterDetails::default()
            }
        }
    }

    /// Books a renter offers, decoded strictly per entry
    ///
    /// An absent document or `rentedBooks` field is an empty list.
    pub async fn fetch_rented_books(&self, renter_id: &str) -> Result<Vec<RentersBook>> {
        let Some(doc) = self.store.get(RENTERS, renter_id).await? else {
            debug!(renter_id, "Renter document not found");
            return Ok(Vec::new());
        };
        let Some(entries) = fields::array(&doc.fields, RENTED_BOOKS) else {
            debug!(renter_id, "Renter has no rentedBooks field");
            return Ok(Vec::new());
        };
        Ok(decode_strict(entries, renter_id))
    }

    /// Whether the renter already offers a book with this id
    pub async fn is_book_listed(&self, renter_id: &str, book_id: &str) -> Result<bool> {
        let listed = self
            .store
            .get(RENTERS, renter_id)
            .await?
            .and_then(|doc| {
                fields::array(&doc.fields, RENTED_BOOKS).map(|entries| {
                    entries
                        .iter()
                        .any(|entry| entry.get("id").and_then(Value::as_str) == Some(book_id))
                })
            })
            .unwrap_or(false);
        Ok(listed)
    }

    /// Offer a book for rent; a book already offered verbatim is not duplicated
    pub async fn add_rented_book(&self, renter_id: &str, book: &RentersBook) -> Result<()> {
        let value =
            serde_json::to_value(book).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.store
            .array_union(RENTERS, renter_id, RENTED_BOOKS, vec![value])
            .await?;
        info!(renter_id, book_id = %book.id, "Added book to rental library");
        Ok(())
    }

    /// Merge a new rating into the renter document
    pub async fn update_renter_rating(&self, renter_id: &str, rating: &Rating) -> Result<()> {
        let scores: Fields = rating
            .to_persistable()
            .into_iter()
            .map(|(key, score)| (key, Value::from(score)))
            .collect();

        let mut update = Fields::new();
        update.insert(RATING.to_string(), Value::Object(scores));

        self.store
            .set(RENTERS, renter_id, update, SetMode::Merge)
            .await?;
        info!(renter_id, average = rating.average(), "Updated renter rating");
        Ok(())
    }
}

fn renter_from_document(doc: &Document, fetched_at: DateTime<Utc>) -> Option<Renter> {
    let Some(name) = fields::string(&doc.fields, "name") else {
        let error = DecodeError::MissingField("name");
        warn!(renter_id = %doc.id, %error, "Skipping renter");
        return None;
    };

    let books = match fields::array(&doc.fields, RENTED_BOOKS) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| match entry.as_object() {
                Some(record) => Some(lenient_renters_book(record, fetched_at)),
                None => {
                    let error = DecodeError::WrongType {
                        field: RENTED_BOOKS,
                        expected: "object",
                    };
                    warn!(renter_id = %doc.id, %error, "Skipping rented book");
                    None
                }
            })
            .collect(),
        None => {
            debug!(renter_id = %doc.id, "rentedBooks field is missing or invalid");
            Vec::new()
        }
    };

    let rating =
        fields::rating_map(&doc.fields, RATING).and_then(|map| Rating::from_partial(&map));

    Some(Renter {
        id: doc.id.clone(),
        name,
        books,
        rating,
    })
}

/// Build a book from whatever the record holds, defaulting every gap
fn lenient_renters_book(record: &Fields, fetched_at: DateTime<Utc>) -> RentersBook {
    RentersBook {
        title: fields::string(record, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: fields::string_array(record, "authors")
            .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]),
        description: fields::string(record, "description")
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        price: fields::float(record, "price").unwrap_or(0.0),
        image_url: fields::string(record, "imageURL").unwrap_or_default(),
        id: fields::string(record, "id").unwrap_or_else(|| Uuid::new_v4().to_string()),
        added_at: fields::timestamp(record, "addedAt").unwrap_or(fetched_at),
    }
}

/// Decode every entry that has all fields, logging the rest
pub(super) fn decode_strict(entries: &[Value], owner: &str) -> Vec<RentersBook> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match serde_json::from_value::<RentersBook>(entry.clone()).map_err(DecodeError::from) {
                Ok(book) => Some(book),
                Err(e) => {
                    warn!(owner, index, error = %e, "Skipping undecodable rented book");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_book_defaults_everything() {
        let fetched_at = Utc::now();
        let book = lenient_renters_book(&Fields::new(), fetched_at);

        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.authors, [UNKNOWN_AUTHOR]);
        assert_eq!(book.description, NO_DESCRIPTION);
        assert_eq!(book.price, 0.0);
        assert_eq!(book.image_url, "");
        assert!(Uuid::parse_str(&book.id).is_ok());
        assert_eq!(book.added_at, fetched_at);
    }

    #[test]
    fn test_lenient_book_ids_are_unique() {
        let now = Utc::now();
        let a = lenient_renters_book(&Fields::new(), now);
        let b = lenient_renters_book(&Fields::new(), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_lenient_book_parses_iso_timestamp() {
        let record = json!({"addedAt": "2024-10-28T12:00:00Z", "price": 3});
        let book = lenient_renters_book(record.as_object().unwrap(), Utc::now());
        assert_eq!(book.added_at.to_rfc3339(), "2024-10-28T12:00:00+00:00");
        assert_eq!(book.price, 3.0);

        let record = json!({"addedAt": "last tuesday"});
        let fetched_at = Utc::now();
        let book = lenient_renters_book(record.as_object().unwrap(), fetched_at);
        assert_eq!(book.added_at, fetched_at);
    }

    #[test]
    fn test_decode_strict_drops_incomplete_entries() {
        let entries = vec![
            json!({
                "title": "Dune", "authors": ["Frank Herbert"], "description": "Spice.",
                "price": 2.0, "imageURL": "", "id": "b1", "addedAt": "2024-10-28T12:00:00Z"
            }),
            json!({"title": "No price"}),
            json!(42),
        ];
        let books = decode_strict(&entries, "u1");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "b1");
    }

    #[test]
    fn test_renter_without_name_is_skipped() {
        let doc = Document::new("r1", json!({"rentedBooks": []}).as_object().cloned().unwrap());
        assert!(renter_from_document(&doc, Utc::now()).is_none());
    }

    #[test]
    fn test_partial_rating_is_not_attached() {
        let doc = Document::new(
            "r1",
            json!({"name": "Asha", "rating": {"bookQuality": 5.0, "communication": 4.0}})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let renter = renter_from_document(&doc, Utc::now()).unwrap();
        assert!(renter.rating.is_none());
        assert!(renter.books.is_empty());
    }
}
