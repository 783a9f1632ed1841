//! Eclipse Core Library
//!
//! Book data access for the Eclipse book-rental app: searching the external
//! book API with a per-query memo, normalizing search results and store
//! records into one [`Book`] type, and assembling renters, lists and rented
//! books from the document store.

pub mod cache;
pub mod config;
pub mod error;
pub mod normalize;
pub mod resolver;
pub mod search;
pub mod session;
pub mod store;
pub mod types;

pub use cache::QueryCache;
pub use config::Config;
pub use error::{DecodeError, EclipseError, Result, StoreError, TransportError};
pub use resolver::{RentalResolver, RenterDetails};
pub use search::SearchClient;
pub use session::{SessionProvider, StaticSession};
pub use store::{Document, DocumentStore, LocalDocumentStore, MemoryDocumentStore};
pub use types::{Book, ImageLinks, List, Rating, RatingMap, Renter, RentersBook};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session() {
        assert_eq!(StaticSession::default().current_user_id(), None);
        assert_eq!(
            StaticSession::signed_in("u1").current_user_id().as_deref(),
            Some("u1")
        );
    }
}
