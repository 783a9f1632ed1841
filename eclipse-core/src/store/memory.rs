//! In-memory document store

use super::{
    apply_array_union, apply_set, validate_collection, validate_id, Document, DocumentStore,
    Fields, SetMode, StoreResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// In-memory document store (for tests and embedding)
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without going through the async API
    pub fn insert(&self, collection: &str, id: &str, fields: Fields) {
        self.write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        validate_collection(collection)?;
        validate_id(id)?;
        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        validate_collection(collection)?;
        Ok(self
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: SetMode,
    ) -> StoreResult<()> {
        validate_collection(collection)?;
        validate_id(id)?;
        let mut collections = self.write();
        let docs = collections.entry(collection.to_string()).or_default();
        let updated = apply_set(docs.remove(id), fields, mode);
        docs.insert(id.to_string(), updated);
        Ok(())
    }

    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        validate_collection(collection)?;
        validate_id(id)?;
        let mut collections = self.write();
        let docs = collections.entry(collection.to_string()).or_default();
        let updated = apply_array_union(docs.remove(id), field, values);
        docs.insert(id.to_string(), updated);
        Ok(())
    }
}
