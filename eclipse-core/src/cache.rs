//! Memo of search results keyed by query string

use crate::types::Book;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Query → results memo with process lifetime
///
/// Keys are the exact query strings callers passed in, so `"Poetry"` and
/// `"poetry"` are separate entries. Nothing expires and there is no capacity
/// bound. Concurrent searches for the same uncached query may both fetch;
/// the last `store` wins.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, Vec<Book>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results stored for this exact query; a miss creates nothing
    pub fn lookup(&self, query: &str) -> Option<Vec<Book>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(query)
            .cloned()
    }

    /// Store results for a query, replacing any previous entry
    pub fn store(&self, query: impl Into<String>, results: Vec<Book>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(query.into(), results);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
