//! HTTP client configuration module
//!
//! Centralised timeouts and connection settings for talking to the
//! availability API. There is no retry policy: a failed call is surfaced to
//! the user and the next poll picks up from there.

use crate::error::AppResult;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Idle pooled connections are dropped after this long
    pub pool_idle_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            user_agent: format!("Cousinentreffen/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for the availability API. Requests must finish well inside one
    /// poll interval so fetches do not pile up.
    pub fn availability_api(poll_interval: Duration) -> Self {
        let timeout = std::cmp::max(
            Duration::from_secs(2),
            std::cmp::min(poll_interval, Duration::from_secs(30)),
        );
        Self {
            connect_timeout: std::cmp::min(Duration::from_secs(5), timeout),
            timeout,
            ..Self::default()
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> AppResult<Client> {
        Ok(ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(2)
            .user_agent(self.user_agent.clone())
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_api_timeout_tracks_poll_interval() {
        let config = HttpConfig::availability_api(Duration::from_secs(10));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));

        let long = HttpConfig::availability_api(Duration::from_secs(300));
        assert_eq!(long.timeout, Duration::from_secs(30));

        let short = HttpConfig::availability_api(Duration::from_secs(1));
        assert_eq!(short.timeout, Duration::from_secs(2));
        assert_eq!(short.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_build_client() {
        assert!(HttpConfig::new().build_client().is_ok());
    }
}
