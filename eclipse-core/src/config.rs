//! Runtime configuration

use std::path::PathBuf;

/// Default search API endpoint
pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Default root of the local document store
pub const DEFAULT_STORE_PATH: &str = "./eclipse_data";

/// Configuration shared by the library and its front ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search API endpoint (`ECLIPSE_BOOKS_API_URL`)
    pub books_api_url: String,

    /// Optional search API key (`ECLIPSE_BOOKS_API_KEY`)
    pub books_api_key: Option<String>,

    /// Root directory of the local document store (`ECLIPSE_STORE_PATH`)
    pub store_path: PathBuf,

    /// Authenticated user, if any (`ECLIPSE_USER_ID`)
    pub user_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            books_api_url: DEFAULT_BOOKS_API_URL.to_string(),
            books_api_key: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            user_id: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source; empty values
    /// count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            books_api_url: var("ECLIPSE_BOOKS_API_URL").unwrap_or(defaults.books_api_url),
            books_api_key: var("ECLIPSE_BOOKS_API_KEY"),
            store_path: var("ECLIPSE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            user_id: var("ECLIPSE_USER_ID"),
        }
    }
}
