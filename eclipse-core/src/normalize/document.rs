//! Normalizer for book records held in the document store
//!
//! Store records are flat maps. `id` and `title` are required; the cover is
//! a single `imageURL` string that fills both thumbnail slots.

use super::{fields, Normalizer};
use crate::store::Fields;
use crate::types::{Book, ImageLinks};

/// Normalizer for flat document-store book records
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentNormalizer;

impl DocumentNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Normalizer for DocumentNormalizer {
    fn normalize(&self, record: &Fields) -> Option<Book> {
        let id = fields::string(record, "id")?;
        let title = fields::string(record, "title")?;

        Some(Book {
            id,
            title,
            subtitle: fields::string(record, "subtitle"),
            authors: fields::string_array(record, "authors"),
            description: fields::string(record, "description"),
            average_rating: fields::float(record, "averageRating"),
            ratings_count: fields::count(record, "ratingsCount"),
            image_links: fields::string(record, "imageURL").map(ImageLinks::single),
            preview_link: fields::string(record, "previewLink"),
            page_count: fields::count(record, "pageCount"),
        })
    }

    fn source_name(&self) -> &str {
        "document store"
    }
}
