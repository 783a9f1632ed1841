//! Local filesystem document store
//!
//! Layout: `{root}/{collection}/{id}.json`. A document's sub-collections live
//! in the directory `{root}/{collection}/{id}/` next to its file.

use super::{
    apply_array_union, apply_set, validate_collection, validate_id, Document, DocumentStore,
    Fields, SetMode, StoreResult,
};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

const EXTENSION: &str = "json";

/// Document store backed by JSON files under a root directory
pub struct LocalDocumentStore {
    root: PathBuf,

    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl LocalDocumentStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> StoreResult<PathBuf> {
        validate_collection(collection)?;
        Ok(collection
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    fn document_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        validate_id(id)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{}.{}", id, EXTENSION)))
    }

    async fn read_fields(path: &Path) -> StoreResult<Option<Fields>> {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };
        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(fields)) => Ok(Some(fields)),
            Ok(_) => Err(StoreError::Malformed(format!(
                "{} is not a JSON object",
                path.display()
            ))),
            Err(e) => Err(StoreError::Malformed(format!("{}: {}", path.display(), e))),
        }
    }

    /// Write to a temp file then rename, so readers never see partial writes
    async fn write_fields(path: &Path, fields: &Fields) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let data = serde_json::to_vec_pretty(fields)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let path = self.document_path(collection, id)?;
        Ok(Self::read_fields(&path)
            .await?
            .map(|fields| Document::new(id, fields)))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let dir = self.collection_dir(collection)?;
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };

        let mut paths = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::read_fields(&path).await {
                Ok(Some(fields)) => documents.push(Document::new(id, fields)),
                Ok(None) => {}
                Err(e) => warn!(collection, id, error = %e, "Skipping unreadable document"),
            }
        }
        Ok(documents)
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        mode: SetMode,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        let existing = match mode {
            SetMode::Merge => Self::read_fields(&path).await?,
            SetMode::Overwrite => None,
        };
        Self::write_fields(&path, &apply_set(existing, fields, mode)).await
    }

    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        let existing = Self::read_fields(&path).await?;
        Self::write_fields(&path, &apply_array_union(existing, field, values)).await
    }
}
