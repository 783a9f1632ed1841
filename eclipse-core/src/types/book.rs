//! The canonical Book type shared by every data source

use serde::{Deserialize, Serialize};

/// Cover image links for a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: String,
    pub thumbnail: String,
}

impl ImageLinks {
    pub fn new(small_thumbnail: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            small_thumbnail: small_thumbnail.into(),
            thumbnail: thumbnail.into(),
        }
    }

    /// Both thumbnails pointing at the same URL
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            small_thumbnail: url.clone(),
            thumbnail: url,
        }
    }
}

/// A normalized book
///
/// `id` and `title` are always present; every other field is best-effort
/// and depends on what the source provided.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Source identifier (search API volume id or store document id)
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Authors in source order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Average rating, conventionally 0-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl Book {
    /// Create a book carrying only the required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            authors: None,
            description: None,
            average_rating: None,
            ratings_count: None,
            image_links: None,
            preview_link: None,
            page_count: None,
        }
    }

    /// Add an author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.get_or_insert_with(Vec::new).push(author.into());
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the primary author (first listed)
    pub fn primary_author(&self) -> Option<&str> {
        self.authors
            .as_ref()
            .and_then(|authors| authors.first())
            .map(|s| s.as_str())
    }

    /// URL of the larger cover thumbnail, if any
    pub fn cover_url(&self) -> Option<&str> {
        self.image_links.as_ref().map(|links| links.thumbnail.as_str())
    }
}
