//! CLI command implementations

mod lists;
mod renters;
mod search;

pub use lists::{lists, rented};
pub use renters::{rate, renter, renters};
pub use search::search;

use anyhow::{Context as _, Result};
use eclipse_core::{
    Config, LocalDocumentStore, RentalResolver, SearchClient, SessionProvider, StaticSession,
};
use std::sync::Arc;

/// Clients shared by every command
pub struct Context {
    pub search: SearchClient,
    pub resolver: RentalResolver,
    session: StaticSession,
}

impl Context {
    pub fn new(config: Config) -> Self {
        tracing::debug!(store = %config.store_path.display(), "Using local document store");
        Self {
            search: SearchClient::new(&config),
            resolver: RentalResolver::new(Arc::new(LocalDocumentStore::new(
                config.store_path.clone(),
            ))),
            session: StaticSession::new(config.user_id),
        }
    }

    /// Explicit `--user`, else the configured session user
    pub fn user_id(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.session.current_user_id())
            .context("No user signed in; pass --user or set ECLIPSE_USER_ID")
    }
}

/// Print a value as pretty JSON
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
