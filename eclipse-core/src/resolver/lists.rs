//! Status lists and custom lists

use super::{RentalResolver, CUSTOM_LISTS, STATUS_LISTS, USERS};
use crate::error::Result;
use crate::normalize::fields;
use crate::store::{subcollection, Document, Fields, SetMode};
use crate::types::{List, UNTITLED};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

impl RentalResolver {
    /// The user's status lists ("Currently Reading", "Want to Read", ...)
    ///
    /// A user with no status lists gets an empty list, not an error.
    pub async fn fetch_status_lists(&self, user_id: &str) -> Result<Vec<List>> {
        self.fetch_lists(user_id, STATUS_LISTS).await
    }

    /// The user's custom lists; empty is a normal outcome
    pub async fn fetch_custom_lists(&self, user_id: &str) -> Result<Vec<List>> {
        self.fetch_lists(user_id, CUSTOM_LISTS).await
    }

    /// Write a custom list, replacing any list with the same id
    pub async fn add_custom_list(&self, user_id: &str, list: &List) -> Result<()> {
        let collection = subcollection(USERS, user_id, CUSTOM_LISTS);
        self.store
            .set(&collection, &list.id, list_fields(list), SetMode::Overwrite)
            .await?;
        info!(user_id, list_id = %list.id, "Saved custom list");
        Ok(())
    }

    async fn fetch_lists(&self, user_id: &str, kind: &str) -> Result<Vec<List>> {
        let collection = subcollection(USERS, user_id, kind);
        let fetched_at = Utc::now();

        let lists: Vec<List> = self
            .store
            .list(&collection)
            .await?
            .iter()
            .map(|doc| list_from_document(doc, fetched_at))
            .collect();

        info!(user_id, kind, count = lists.len(), "Fetched lists");
        Ok(lists)
    }
}

/// Each field defaults independently when absent or mistyped
fn list_from_document(doc: &Document, fetched_at: DateTime<Utc>) -> List {
    List {
        id: doc.id.clone(),
        title: fields::string(&doc.fields, "title").unwrap_or_else(|| UNTITLED.to_string()),
        book_ids: fields::string_array(&doc.fields, "bookIDs").unwrap_or_default(),
        is_private: fields::boolean(&doc.fields, "isPrivate").unwrap_or(false),
        created_at: fields::timestamp(&doc.fields, "createdAt").unwrap_or(fetched_at),
    }
}

fn list_fields(list: &List) -> Fields {
    let mut fields = Fields::new();
    fields.insert("title".to_string(), Value::from(list.title.clone()));
    fields.insert("bookIDs".to_string(), Value::from(list.book_ids.clone()));
    fields.insert("isPrivate".to_string(), Value::from(list.is_private));
    fields.insert(
        "createdAt".to_string(),
        Value::from(list.created_at.to_rfc3339()),
    );
    fields
}
