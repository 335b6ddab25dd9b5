use super::AvailabilityStore;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{AvailabilityRecord, AvailabilityRequest, AvailabilityResponse, Settings};
use crate::utils::logging::{log_network_error, log_store_operation};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use std::time::Instant;

/// Client for the availability REST API.
#[derive(Clone)]
pub struct HttpAvailabilityStore {
    client: Client,
    base_url: String,
}

impl HttpAvailabilityStore {
    pub fn new(base_url: &str, config: &HttpConfig) -> AppResult<Self> {
        Ok(Self {
            client: config.build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let config = HttpConfig::availability_api(settings.poll_interval());
        info!("Using availability API at {}", settings.api_base());
        Self::new(settings.api_base(), &config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        if status == reqwest::StatusCode::NOT_FOUND {
            Err(AppError::not_found(text))
        } else {
            Err(AppError::store(format!("HTTP {}: {}", status, text)))
        }
    }
}

#[async_trait]
impl AvailabilityStore for HttpAvailabilityStore {
    async fn list_all(&self) -> AppResult<Vec<AvailabilityRecord>> {
        let started = Instant::now();
        let result = async {
            let response = self.client.get(self.url("availability")).send().await?;
            let records = Self::ensure_success(response)
                .await?
                .json::<Vec<AvailabilityRecord>>()
                .await?;
            Ok::<_, AppError>(records)
        }
        .await;

        match &result {
            Ok(records) => {
                debug!("Fetched {} availability records", records.len());
                log_store_operation("list_all", started.elapsed().as_millis() as u64);
            }
            Err(e) => log_network_error("list availability", e),
        }
        result
    }

    async fn toggle(&self, request: &AvailabilityRequest) -> AppResult<AvailabilityResponse> {
        let started = Instant::now();
        let result = async {
            let response = self
                .client
                .post(self.url("availability"))
                .json(request)
                .send()
                .await?;
            let body = Self::ensure_success(response)
                .await?
                .json::<AvailabilityResponse>()
                .await?;
            Ok::<_, AppError>(body)
        }
        .await;

        match &result {
            Ok(body) => {
                debug!(
                    "Toggled {} on {}: {} (available: {})",
                    request.user_name, request.date, body.message, body.available
                );
                log_store_operation("toggle", started.elapsed().as_millis() as u64);
            }
            Err(e) => log_network_error("toggle availability", e),
        }
        result
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let started = Instant::now();
        let response = self
            .client
            .delete(self.url(&format!("availability/{}", id)))
            .send()
            .await
            .map_err(|e| {
                log_network_error("delete availability", &e);
                AppError::from(e)
            })?;
        Self::ensure_success(response).await?;
        log_store_operation("delete", started.elapsed().as_millis() as u64);
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<String>> {
        let response = self.client.get(self.url("users")).send().await?;
        let users = Self::ensure_success(response)
            .await?
            .json::<Vec<String>>()
            .await?;
        Ok(users)
    }
}
