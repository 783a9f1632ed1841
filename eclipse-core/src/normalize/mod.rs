//! Normalizers for converting raw records into the canonical [`Book`]
//!
//! The two sources disagree on shape and on which fields they omit, so each
//! gets its own lenient decoder rather than a shared schema.

mod document;
pub mod fields;
mod volume;

pub use document::DocumentNormalizer;
pub use volume::{VolumeNormalizer, UNKNOWN_ID, UNKNOWN_TITLE};

use crate::store::Fields;
use crate::types::Book;

/// Trait for turning a source record into a [`Book`]
pub trait Normalizer: Send + Sync {
    /// Normalize a record; `None` means the record cannot form a book,
    /// which is an ordinary outcome rather than an error
    fn normalize(&self, record: &Fields) -> Option<Book>;

    /// Human-readable name of the source, for logs
    fn source_name(&self) -> &str;
}
