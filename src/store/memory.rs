use super::AvailabilityStore;
use crate::error::{AppError, AppResult};
use crate::models::{AvailabilityRecord, AvailabilityRequest, AvailabilityResponse};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;

/// Process-local store with the same toggle semantics as the REST service.
///
/// Backs offline mode and keeps integration tests independent of a server.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<AvailabilityRecord>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `records`; ids continue after the highest one given.
    pub fn with_records(records: Vec<AvailabilityRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { records, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn list_all(&self) -> AppResult<Vec<AvailabilityRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn toggle(&self, request: &AvailabilityRequest) -> AppResult<AvailabilityResponse> {
        if request.user_name.trim().is_empty() {
            return Err(AppError::invalid_input("userName is required"));
        }

        let mut inner = self.inner.write().await;
        let existing = inner
            .records
            .iter()
            .position(|r| r.matches(&request.user_name, request.date));

        match existing {
            Some(index) => {
                let removed = inner.records.remove(index);
                debug!("Removed availability {} for {}", removed.id, removed.user_name);
                Ok(AvailabilityResponse {
                    message: "Availability removed".to_string(),
                    id: None,
                    available: false,
                })
            }
            None => {
                inner.next_id += 1;
                let id = inner.next_id;
                inner.records.push(AvailabilityRecord {
                    id,
                    user_name: request.user_name.clone(),
                    date: request.date,
                    available: true,
                    created_at: Some(Utc::now().to_rfc3339()),
                });
                debug!("Added availability {} for {}", id, request.user_name);
                Ok(AvailabilityResponse {
                    message: "Availability added".to_string(),
                    id: Some(id),
                    available: true,
                })
            }
        }
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(AppError::not_found(format!("availability {}", id)));
        }
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<String>> {
        let inner = self.inner.read().await;
        let mut users: Vec<String> = Vec::new();
        for record in &inner.records {
            if !users.contains(&record.user_name) {
                users.push(record.user_name.clone());
            }
        }
        Ok(users)
    }
}
