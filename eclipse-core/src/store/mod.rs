//! Document-store abstraction
//!
//! The remote store is schema-flexible: collections of documents addressed by
//! slash-separated paths (`renters`, `users/{uid}/statusLists`), each document
//! an id plus a JSON object.

mod local;
mod memory;

pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Result type for document-store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Field map of a single document
pub type Fields = serde_json::Map<String, Value>;

/// A document read from the store
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// How a write treats fields already present on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Replace the whole document
    Overwrite,

    /// Upsert: keep top-level fields the write does not mention
    Merge,
}

/// Abstract document-store trait
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` if it does not exist
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// All documents of a collection in ascending id order; an absent
    /// collection is empty
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Write a document
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: SetMode,
    ) -> StoreResult<()>;

    /// Append each value not already present to an array field, creating the
    /// document or field as needed
    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()>;
}

/// Path of a document's sub-collection, e.g. `users/u1/statusLists`
pub fn subcollection(collection: &str, id: &str, name: &str) -> String {
    format!("{}/{}/{}", collection, id, name)
}

/// Reject empty segments and relative components in a collection path
fn validate_collection(collection: &str) -> StoreResult<()> {
    if collection.is_empty() {
        return Err(StoreError::InvalidPath("empty collection path".to_string()));
    }
    for segment in collection.split('/') {
        validate_segment(segment).map_err(|_| {
            StoreError::InvalidPath(format!("invalid collection path: {}", collection))
        })?;
    }
    Ok(())
}

/// Reject ids that could escape their collection
fn validate_id(id: &str) -> StoreResult<()> {
    validate_segment(id)
}

fn validate_segment(segment: &str) -> StoreResult<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\'])
    {
        return Err(StoreError::InvalidPath(format!(
            "invalid path segment: {:?}",
            segment
        )));
    }
    Ok(())
}

/// Apply a write to an existing document
fn apply_set(existing: Option<Fields>, fields: Fields, mode: SetMode) -> Fields {
    match (mode, existing) {
        (SetMode::Merge, Some(mut current)) => {
            current.extend(fields);
            current
        }
        _ => fields,
    }
}

/// Union `values` into `field`; a non-array field is replaced
fn apply_array_union(existing: Option<Fields>, field: &str, values: Vec<Value>) -> Fields {
    let mut doc = existing.unwrap_or_default();
    let mut items = match doc.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    for value in values {
        if !items.contains(&value) {
            items.push(value);
        }
    }
    doc.insert(field.to_string(), Value::Array(items));
    doc
}
