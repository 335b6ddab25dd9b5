//! # Availability Store
//!
//! The remote service owning availability records. The flow only ever talks
//! to it through [`AvailabilityStore`], so the HTTP client and the in-memory
//! store are interchangeable.

use crate::error::AppResult;
use crate::models::{AvailabilityRecord, AvailabilityRequest, AvailabilityResponse, Settings};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

pub mod http;
pub mod memory;

pub use http::HttpAvailabilityStore;
pub use memory::InMemoryStore;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Full snapshot of every record, no pagination.
    async fn list_all(&self) -> AppResult<Vec<AvailabilityRecord>>;

    /// Adds the record if absent, removes it if present. The server decides.
    async fn toggle(&self, request: &AvailabilityRequest) -> AppResult<AvailabilityResponse>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Distinct user names known to the server.
    async fn list_users(&self) -> AppResult<Vec<String>>;
}

/// Picks the store for this run: in-memory when offline, HTTP otherwise.
pub fn from_settings(settings: &Settings) -> AppResult<Arc<dyn AvailabilityStore>> {
    if settings.offline {
        info!("Offline mode, availability lives in memory only");
        return Ok(Arc::new(InMemoryStore::new()));
    }
    Ok(Arc::new(HttpAvailabilityStore::from_settings(settings)?))
}
