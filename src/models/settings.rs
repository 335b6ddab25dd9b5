// file: src/models/settings.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Berlin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub intro_duration_ms: u64,
    pub intro_failsafe_grace_ms: u64, // added on top of the intro duration
    pub title_display_ms: u64,
    pub celebration_display_ms: u64,
    pub time_zone: String,
    pub sound_enabled: bool,
    pub volume: f32, // 0.0 to 1.0
    pub offline: bool, // use the in-memory store instead of the HTTP API
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_secs: 10,
            intro_duration_ms: 10_000,
            intro_failsafe_grace_ms: 500,
            title_display_ms: 2_000,
            celebration_display_ms: 2_000,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            sound_enabled: true,
            volume: 0.7,
            offline: false,
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn intro_duration(&self) -> Duration {
        Duration::from_millis(self.intro_duration_ms)
    }

    /// Upper bound on how long the intro may keep the flow waiting.
    pub fn intro_failsafe(&self) -> Duration {
        Duration::from_millis(self.intro_duration_ms.saturating_add(self.intro_failsafe_grace_ms))
    }

    pub fn title_display(&self) -> Duration {
        Duration::from_millis(self.title_display_ms)
    }

    pub fn celebration_display(&self) -> Duration {
        Duration::from_millis(self.celebration_display_ms)
    }

    /// Base URL without a trailing slash, ready for `format!("{}/path")`.
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
