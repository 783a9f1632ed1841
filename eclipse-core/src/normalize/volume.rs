//! Normalizer for search API volume items
//!
//! An item is `{id, volumeInfo: {...}}`. Missing ids and titles are filled
//! with sentinels instead of rejecting the item; only an item without a
//! `volumeInfo` object is unusable.

use super::{fields, Normalizer};
use crate::store::Fields;
use crate::types::{Book, ImageLinks};

/// Id given to volumes the API returned without one
pub const UNKNOWN_ID: &str = "Unknown ID";

/// Title given to volumes the API returned without one
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Normalizer for search API `items[]` entries
#[derive(Debug, Default, Clone, Copy)]
pub struct VolumeNormalizer;

impl VolumeNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Both thumbnails must be present; a partial pair is dropped
    fn image_links(info: &Fields) -> Option<ImageLinks> {
        let links = fields::object(info, "imageLinks")?;
        Some(ImageLinks::new(
            fields::string(links, "smallThumbnail")?,
            fields::string(links, "thumbnail")?,
        ))
    }
}

impl Normalizer for VolumeNormalizer {
    fn normalize(&self, record: &Fields) -> Option<Book> {
        let info = fields::object(record, "volumeInfo")?;

        Some(Book {
            id: fields::string(record, "id").unwrap_or_else(|| UNKNOWN_ID.to_string()),
            title: fields::trimmed_string(info, "title")
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            subtitle: fields::trimmed_string(info, "subtitle"),
            authors: fields::string_array(info, "authors"),
            description: fields::trimmed_string(info, "description"),
            average_rating: fields::float(info, "averageRating"),
            ratings_count: fields::count(info, "ratingsCount"),
            image_links: Self::image_links(info),
            preview_link: fields::string(info, "previewLink"),
            page_count: fields::count(info, "pageCount"),
        })
    }

    fn source_name(&self) -> &str {
        "search API"
    }
}
