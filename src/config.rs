//! Configuration loading and validation
//!
//! Settings come from `settings.json` in the user's config directory when it
//! exists, with a few environment variables layered on top. Everything has a
//! default, so a missing file is not an error.

use crate::error::{AppError, AppResult};
use crate::models::Settings;
use chrono_tz::Tz;
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

pub const ENV_API_URL: &str = "COUSINENTREFFEN_API_URL";
pub const ENV_POLL_SECS: &str = "COUSINENTREFFEN_POLL_SECS";
pub const ENV_OFFLINE: &str = "COUSINENTREFFEN_OFFLINE";

/// Upper bound for the intro, its failsafe grace and the timed screens.
pub const MAX_SCREEN_DURATION_MS: u64 = 60_000;

/// Location of the optional settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cousinentreffen")
        .join("settings.json")
}

/// Loads settings from the default location, applies environment overrides and
/// validates the result.
pub fn load_settings() -> AppResult<Settings> {
    let mut settings = load_settings_file(&settings_path())?;
    apply_env_overrides(&mut settings)?;
    validate_config(&settings)?;
    Ok(settings)
}

/// Reads a settings file, returning defaults when it does not exist.
pub fn load_settings_file(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        info!("No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&raw)?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}

pub fn save_settings_file(path: &Path, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

pub fn apply_env_overrides(settings: &mut Settings) -> AppResult<()> {
    if let Ok(url) = env::var(ENV_API_URL) {
        info!("API base URL overridden from environment");
        settings.api_base_url = url;
    }

    if let Ok(secs) = env::var(ENV_POLL_SECS) {
        settings.poll_interval_secs = secs
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{} must be a whole number of seconds", ENV_POLL_SECS)))?;
    }

    if let Ok(flag) = env::var(ENV_OFFLINE) {
        settings.offline = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
    }

    Ok(())
}

/// Parses the configured reference time zone.
pub fn reference_time_zone(settings: &Settings) -> AppResult<Tz> {
    settings
        .time_zone
        .parse::<Tz>()
        .map_err(|_| AppError::config(format!("Unknown time zone: {}", settings.time_zone)))
}

/// Validates application configuration
///
/// # Returns
///
/// * `Ok(())` - settings are usable
/// * `Err(AppError::Config)` - the first problem found
///
pub fn validate_config(settings: &Settings) -> AppResult<()> {
    let url = Url::parse(&settings.api_base_url)
        .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {}", settings.api_base_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::config(format!(
            "API base URL must use http or https, got '{}://'",
            url.scheme()
        )));
    }

    if url.scheme() == "http" && url.host_str() != Some("localhost") {
        warn!("API base URL is plain HTTP on a non-local host: {}", settings.api_base_url);
    }

    if settings.poll_interval_secs == 0 {
        return Err(AppError::config("Poll interval must be at least one second"));
    }

    if settings.intro_duration_ms == 0 || settings.title_display_ms == 0 || settings.celebration_display_ms == 0 {
        return Err(AppError::config("Screen display durations must be non-zero"));
    }

    let longest = [
        settings.intro_duration_ms,
        settings.intro_failsafe_grace_ms,
        settings.title_display_ms,
        settings.celebration_display_ms,
    ]
    .into_iter()
    .max()
    .unwrap_or_default();
    if longest > MAX_SCREEN_DURATION_MS {
        return Err(AppError::config(format!(
            "Screen durations must not exceed {} ms, got {} ms",
            MAX_SCREEN_DURATION_MS, longest
        )));
    }

    if !(0.0..=1.0).contains(&settings.volume) {
        return Err(AppError::config("Volume must be between 0.0 and 1.0"));
    }

    reference_time_zone(settings)?;

    info!("Configuration validated (store: {})", if settings.offline { "in-memory" } else { settings.api_base() });
    Ok(())
}
