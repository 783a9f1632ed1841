//! Typed search API response used by the strict full-text search
//!
//! Unlike the lenient path, every item must carry an `id` and a
//! `volumeInfo.title`, and any cover must have both thumbnails.

use crate::types::{Book, ImageLinks};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct VolumeEnvelope {
    #[serde(default)]
    pub items: Option<Vec<VolumeItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeItem {
    pub id: String,
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub preview_link: Option<String>,
    pub page_count: Option<u32>,
}

impl From<VolumeItem> for Book {
    fn from(item: VolumeItem) -> Self {
        let info = item.volume_info;
        Self {
            id: item.id,
            title: info.title,
            subtitle: info.subtitle,
            authors: info.authors,
            description: info.description,
            average_rating: info.average_rating,
            ratings_count: info.ratings_count,
            image_links: info.image_links,
            preview_link: info.preview_link,
            page_count: info.page_count,
        }
    }
}
