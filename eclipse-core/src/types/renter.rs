//! Renters and the books they offer

use super::{Book, Rating};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book a renter offers (or a borrower currently holds)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentersBook {
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,

    /// Price per day
    pub price: f64,

    #[serde(rename = "imageURL")]
    pub image_url: String,

    pub id: String,

    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub added_at: DateTime<Utc>,
}

impl RentersBook {
    /// Offer a searched book at `price` per day, stamped now
    ///
    /// Missing authors, description or cover become empty values.
    pub fn from_book(book: &Book, price: f64) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            price,
            image_url: book.cover_url().unwrap_or_default().to_string(),
            id: book.id.clone(),
            added_at: Utc::now(),
        }
    }
}

/// A user offering books for rental
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Renter {
    pub id: String,
    pub name: String,

    /// Offered books in store order
    pub books: Vec<RentersBook>,

    pub rating: Option<Rating>,
}

impl Renter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            books: Vec::new(),
            rating: None,
        }
    }

    /// Composite rating, if the renter has been rated
    pub fn average_rating(&self) -> Option<f64> {
        self.rating.as_ref().map(Rating::average)
    }
}
