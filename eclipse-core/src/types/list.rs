//! User book lists (status lists and custom lists)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a stored list has none
pub const UNTITLED: &str = "Untitled";

/// An ordered list of book ids owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub title: String,

    /// Book ids in the order the store holds them
    #[serde(rename = "bookIDs")]
    pub book_ids: Vec<String>,

    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Create an empty public list stamped with the current time
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            book_ids: Vec::new(),
            is_private: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_book(mut self, book_id: impl Into<String>) -> Self {
        self.book_ids.push(book_id.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn len(&self) -> usize {
        self.book_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book_ids.is_empty()
    }
}
