//! Renter and rental resolver
//!
//! Read operations over the document store that assemble [`Renter`]s,
//! [`List`]s and [`RentersBook`]s. Batch reads degrade per record: a
//! malformed entry is logged and dropped, the rest of the batch proceeds.
//! Documents that together form one result are read without any atomicity.
//!
//! [`Renter`]: crate::types::Renter
//! [`List`]: crate::types::List
//! [`RentersBook`]: crate::types::RentersBook

mod books;
mod lists;
mod renters;

pub use renters::RenterDetails;

use crate::normalize::DocumentNormalizer;
use crate::store::DocumentStore;
use std::sync::Arc;

/// Global collection of renter documents
pub const RENTERS: &str = "renters";

/// Global collection of book documents
pub const BOOKS: &str = "books";

/// Collection of user documents; rental sub-collections hang off these
pub const USERS: &str = "users";

pub const BORROWED_BOOKS: &str = "borrowedBooks";
pub const STATUS_LISTS: &str = "statusLists";
pub const CUSTOM_LISTS: &str = "customLists";

/// Resolver over a shared document store
#[derive(Clone)]
pub struct RentalResolver {
    store: Arc<dyn DocumentStore>,
    normalizer: DocumentNormalizer,
}

impl RentalResolver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            normalizer: DocumentNormalizer::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}
