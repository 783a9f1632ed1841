//! Book search client
//!
//! Queries the external search API, normalizes the returned volumes and
//! memoizes subject searches in a [`QueryCache`] owned by the client.

mod envelope;
mod transport;

pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::{EclipseError, Result};
use crate::normalize::{Normalizer, VolumeNormalizer};
use crate::types::Book;
use envelope::VolumeEnvelope;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client for the book search API
///
/// Clones share the same transport and cache.
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<QueryCache>,
    api_url: String,
    api_key: Option<String>,
    normalizer: VolumeNormalizer,
}

impl SearchClient {
    /// Create a client talking to the configured API over HTTP
    pub fn new(config: &Config) -> Self {
        let client = Self::with_transport(
            Arc::new(ReqwestTransport::new()),
            config.books_api_url.clone(),
        );
        match &config.books_api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        }
    }

    /// Create a client over an arbitrary transport with a fresh cache
    pub fn with_transport(transport: Arc<dyn HttpTransport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new()),
            api_url: api_url.into(),
            api_key: None,
            normalizer: VolumeNormalizer::new(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Share an existing cache with this client
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Handle to the client's cache
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Subject search, memoized per exact query string
    ///
    /// A cache hit returns without touching the network. On a miss the
    /// results are fetched, items without `volumeInfo` are skipped, and the
    /// rest are cached under `query` in source order.
    pub async fn search(&self, query: &str) -> Result<Vec<Book>> {
        if let Some(books) = self.cache.lookup(query) {
            debug!(query, count = books.len(), "Search cache hit");
            return Ok(books);
        }
        debug!(query, "Search cache miss");

        let url = self.search_url(&format!("subject:{}", Self::encode(query)))?;
        let body = self.fetch(&url).await?;
        let books = self.normalize_items(&body)?;

        info!(query, count = books.len(), "Fetched books from search API");
        self.cache.store(query, books.clone());
        Ok(books)
    }

    /// Strict full-text search
    ///
    /// The whole body must decode into the typed response; one bad item fails
    /// the call. The cache is neither read nor written.
    pub async fn search_full_text(&self, query: &str) -> Result<Vec<Book>> {
        let url = self.search_url(&Self::encode(query))?;
        let body = self.fetch(&url).await?;

        let envelope: VolumeEnvelope = serde_json::from_slice(&body)
            .map_err(|e| EclipseError::InvalidResponse(e.to_string()))?;
        let items = envelope
            .items
            .ok_or_else(|| EclipseError::NotFound(format!("no items for query {:?}", query)))?;

        info!(query, count = items.len(), "Full-text search completed");
        Ok(items.into_iter().map(Book::from).collect())
    }

    /// Download raw image bytes; any failure yields `None`
    pub async fn download_image(&self, url: &str) -> Option<Vec<u8>> {
        let url = Url::parse(url).ok()?;
        match self.transport.get(&url).await {
            Ok(response) if response.is_success() && !response.body.is_empty() => {
                Some(response.body)
            }
            Ok(response) => {
                debug!(%url, status = response.status, "Image download returned no data");
                None
            }
            Err(e) => {
                debug!(%url, error = %e, "Image download failed");
                None
            }
        }
    }

    fn encode(query: &str) -> String {
        urlencoding::encode(query).into_owned()
    }

    /// Build `{api_url}?q={q}[&key=..]`; `q` must already be encoded
    fn search_url(&self, q: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            EclipseError::InvalidQuery(format!("invalid API URL {:?}: {}", self.api_url, e))
        })?;

        let mut query = format!("q={}", q);
        if let Some(key) = &self.api_key {
            query.push_str("&key=");
            query.push_str(&urlencoding::encode(key));
        }
        url.set_query(Some(&query));
        Ok(url)
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "Requesting search API");
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(EclipseError::NoData(format!(
                "search API responded with status {}",
                response.status
            )));
        }
        if response.body.is_empty() {
            return Err(EclipseError::NoData("empty response body".to_string()));
        }
        Ok(response.body)
    }

    fn normalize_items(&self, body: &[u8]) -> Result<Vec<Book>> {
        let json: Value = serde_json::from_slice(body)
            .map_err(|e| EclipseError::InvalidResponse(e.to_string()))?;
        let items = json
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                EclipseError::InvalidResponse("response has no `items` array".to_string())
            })?;

        let mut books = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_object().and_then(|record| self.normalizer.normalize(record)) {
                Some(book) => books.push(book),
                None => warn!(
                    index,
                    source = self.normalizer.source_name(),
                    "Skipping item without volumeInfo"
                ),
            }
        }
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport that replays one canned response and records requested URLs
    struct CannedTransport {
        response: std::result::Result<HttpResponse, String>,
        requests: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn ok(body: &str) -> Arc<Self> {
            Self::status(200, body)
        }

        fn status(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(HttpResponse::new(status, body.as_bytes())),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: Err("connection refused".to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.response
                .clone()
                .map_err(TransportError::Request)
        }
    }

    const API: &str = "https://books.example/v1/volumes";

    fn client(transport: Arc<CannedTransport>) -> SearchClient {
        SearchClient::with_transport(transport, API)
    }

    #[tokio::test]
    async fn test_subject_url_is_percent_encoded() {
        let transport = CannedTransport::ok(r#"{"items": []}"#);
        let client = client(transport.clone()).with_api_key("k 1");

        client.search("science fiction").await.unwrap();

        assert_eq!(
            transport.requests(),
            [format!("{}?q=subject:science%20fiction&key=k%201", API)]
        );
    }

    #[tokio::test]
    async fn test_skips_items_without_volume_info() {
        let transport = CannedTransport::ok(
            r#"{"items": [
                {"id": "a", "volumeInfo": {"title": "First"}},
                {"id": "b"},
                "garbage",
                {"id": "c", "volumeInfo": {"title": "Third"}}
            ]}"#,
        );
        let books = client(transport).search("fantasy").await.unwrap();

        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[tokio::test]
    async fn test_error_kinds() {
        let err = client(CannedTransport::failing())
            .search("x")
            .await
            .unwrap_err();
        assert!(matches!(err, EclipseError::Transport(_)));

        let err = client(CannedTransport::status(503, "")).search("x").await.unwrap_err();
        assert!(matches!(err, EclipseError::NoData(_)));

        let err = client(CannedTransport::ok("")).search("x").await.unwrap_err();
        assert!(matches!(err, EclipseError::NoData(_)));

        let err = client(CannedTransport::ok("<html>")).search("x").await.unwrap_err();
        assert!(matches!(err, EclipseError::InvalidResponse(_)));

        let err = client(CannedTransport::ok(r#"{"totalItems": 0}"#))
            .search("x")
            .await
            .unwrap_err();
        assert!(matches!(err, EclipseError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_failed_search_is_not_cached() {
        let transport = CannedTransport::status(500, "");
        let client = client(transport.clone());

        assert!(client.search("x").await.is_err());
        assert!(client.search("x").await.is_err());
        assert_eq!(transport.requests().len(), 2);
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_sent_and_cached() {
        let transport =
            CannedTransport::ok(r#"{"items": [{"id": "a", "volumeInfo": {"title": "Any"}}]}"#);
        let client = client(transport.clone());

        let books = client.search("").await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(transport.requests(), [format!("{}?q=subject:", API)]);
        assert_eq!(client.cache().lookup(""), Some(books.clone()));

        // Served from the cache the second time
        assert_eq!(client.search("").await.unwrap(), books);
        assert_eq!(transport.requests().len(), 1);

        // Whitespace is encoded, not rejected
        client.search("  ").await.unwrap();
        assert_eq!(transport.requests()[1], format!("{}?q=subject:%20%20", API));
    }

    #[tokio::test]
    async fn test_invalid_api_url() {
        let transport = CannedTransport::ok(r#"{"items": []}"#);
        let err = SearchClient::with_transport(transport.clone(), "not a url")
            .search("poetry")
            .await
            .unwrap_err();
        assert!(matches!(err, EclipseError::InvalidQuery(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_full_text_is_strict_and_uncached() {
        let transport = CannedTransport::ok(
            r#"{"items": [
                {"id": "a", "volumeInfo": {"title": "First"}},
                {"id": "b"}
            ]}"#,
        );
        let client = client(transport.clone());

        let err = client.search_full_text("first").await.unwrap_err();
        assert!(matches!(err, EclipseError::InvalidResponse(_)));
        assert_eq!(transport.requests(), [format!("{}?q=first", API)]);

        let transport = CannedTransport::ok(
            r#"{"items": [{"id": "a", "volumeInfo": {"title": "  First ", "pageCount": 10}}]}"#,
        );
        let client = SearchClient::with_transport(transport.clone(), API);
        let books = client.search_full_text("first").await.unwrap();
        assert_eq!(books[0].title, "  First ");
        assert_eq!(books[0].page_count, Some(10));

        client.search_full_text("first").await.unwrap();
        assert_eq!(transport.requests().len(), 2);
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_full_text_without_items_is_not_found() {
        let err = client(CannedTransport::ok(r#"{"totalItems": 0}"#))
            .search_full_text("zzz")
            .await
            .unwrap_err();
        assert!(matches!(err, EclipseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_download_image() {
        let client = client(CannedTransport::ok("\u{89}PNG"));
        assert!(client.download_image("http://img.example/a.png").await.is_some());
        assert!(client.download_image("not a url").await.is_none());

        let client = SearchClient::with_transport(CannedTransport::status(404, "missing"), API);
        assert!(client.download_image("http://img.example/a.png").await.is_none());
    }
}
