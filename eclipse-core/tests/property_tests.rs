//! Behavioural guarantees of the search, rating and resolver layers

use async_trait::async_trait;
use eclipse_core::normalize::{DocumentNormalizer, Normalizer, VolumeNormalizer};
use eclipse_core::search::{HttpResponse, HttpTransport};
use eclipse_core::store::Fields;
use eclipse_core::{
    Book, EclipseError, MemoryDocumentStore, Rating, RentalResolver, SearchClient,
    TransportError,
};
use proptest::prelude::*;
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Transport serving a fixed body and counting requests
struct CountingTransport {
    body: String,
    calls: AtomicUsize,
}

impl CountingTransport {
    fn new(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn get(&self, _url: &Url) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::new(200, self.body.as_bytes()))
    }
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn resolver_with(store: MemoryDocumentStore) -> RentalResolver {
    RentalResolver::new(Arc::new(store))
}

#[tokio::test]
async fn test_cache_hit_is_identical_and_offline() {
    let transport = CountingTransport::new(json!({
        "items": [
            {"id": "v1", "volumeInfo": {"title": "Leaves of Grass"}},
            {"id": "v2", "volumeInfo": {"title": "Ariel"}}
        ]
    }));
    let client = SearchClient::with_transport(transport.clone(), "https://books.example/volumes");

    let first = client.search("Poetry").await.unwrap();
    let second = client.search("Poetry").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(transport.calls(), 1);

    // Keys are not case-folded
    client.search("poetry").await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_misses_leave_one_valid_entry() {
    let transport = CountingTransport::new(json!({
        "items": [{"id": "h1", "volumeInfo": {"title": "The Histories"}}]
    }));
    let client = SearchClient::with_transport(transport.clone(), "https://books.example/volumes");
    let other = client.clone();

    let (a, b) = tokio::join!(client.search("history"), other.search("history"));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a, b);
    assert_eq!(client.cache().len(), 1);
    assert_eq!(client.cache().lookup("history"), Some(a));
    // Both may have missed; neither fetches more than once
    assert!((1..=2).contains(&transport.calls()));
}

#[tokio::test]
async fn test_clones_share_the_cache() {
    let transport = CountingTransport::new(json!({"items": []}));
    let client = SearchClient::with_transport(transport.clone(), "https://books.example/volumes");
    let other = client.clone();

    client.search("history").await.unwrap();
    other.search("history").await.unwrap();

    assert_eq!(transport.calls(), 1);
    assert!(Arc::ptr_eq(client.cache(), other.cache()));
}

proptest! {
    #[test]
    fn test_rating_round_trip(
        a in -1.0e6f64..1.0e6,
        b in -1.0e6f64..1.0e6,
        c in -1.0e6f64..1.0e6,
    ) {
        let rating = Rating::compose(a, b, c);
        let restored = Rating::from_partial(&rating.to_persistable());
        prop_assert_eq!(restored, Some(rating));
    }
}

#[test]
fn test_partial_rating_rejection() {
    let full = Rating::compose(4.0, 3.0, 5.0).to_persistable();
    for key in ["bookQuality", "communication", "overallExperience"] {
        let mut partial = full.clone();
        partial.remove(key);
        assert_eq!(Rating::from_partial(&partial), None, "without {}", key);
    }
    assert_eq!(Rating::from_partial(&Default::default()), None);
}

#[test]
fn test_average_is_exact() {
    assert_eq!(Rating::compose(3.0, 4.0, 5.0).average(), 4.0);
}

#[test]
fn test_document_path_requires_id_and_title() {
    let normalizer = DocumentNormalizer::new();

    assert!(normalizer
        .normalize(&fields(json!({"title": "Beloved"})))
        .is_none());
    assert!(normalizer.normalize(&fields(json!({"id": "b1"}))).is_none());

    let book = normalizer
        .normalize(&fields(json!({"id": "b1", "title": "Beloved"})))
        .unwrap();
    assert_eq!(book, Book::new("b1", "Beloved"));
}

#[test]
fn test_search_path_fills_defaults() {
    let normalizer = VolumeNormalizer::new();

    let untitled = normalizer
        .normalize(&fields(json!({"id": "v1", "volumeInfo": {"pageCount": 90}})))
        .unwrap();
    assert_eq!(untitled.title, "Unknown Title");
    assert_eq!(untitled.id, "v1");

    let anonymous = normalizer
        .normalize(&fields(json!({"volumeInfo": {"title": "Ariel"}})))
        .unwrap();
    assert_eq!(anonymous.id, "Unknown ID");
    assert_eq!(anonymous.title, "Ariel");
}

#[tokio::test]
async fn test_renter_batch_skips_nameless_documents() {
    let store = MemoryDocumentStore::new();
    store.insert(
        "renters",
        "r1",
        fields(json!({
            "name": "Asha",
            "rentedBooks": [{"title": "Beloved", "price": 1.5}],
            "rating": {"bookQuality": 5.0, "communication": 4.0, "overallExperience": 3.0}
        })),
    );
    store.insert("renters", "r2", fields(json!({"rentedBooks": []})));
    store.insert("renters", "r3", fields(json!({"name": "Chen"})));

    let renters = resolver_with(store).fetch_renters().await.unwrap();

    let ids: Vec<_> = renters.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r3"]);

    let asha = &renters[0];
    assert_eq!(asha.books.len(), 1);
    assert_eq!(asha.books[0].title, "Beloved");
    assert_eq!(asha.books[0].authors, ["Unknown Author"]);
    assert_eq!(asha.average_rating(), Some(4.0));

    let chen = &renters[1];
    assert!(chen.books.is_empty());
    assert!(chen.rating.is_none());
}

#[tokio::test]
async fn test_empty_collections_differ_by_reader() {
    let resolver = resolver_with(MemoryDocumentStore::new());

    let err = resolver.fetch_currently_rented_books("u1").await.unwrap_err();
    assert!(matches!(err, EclipseError::NotFound(_)));

    let lists = resolver.fetch_status_lists("u1").await.unwrap();
    assert!(lists.is_empty());

    let lists = resolver.fetch_custom_lists("u1").await.unwrap();
    assert!(lists.is_empty());
}
