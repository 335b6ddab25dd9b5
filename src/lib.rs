// Cousinentreffen Library
// Exposes core functionality for testing and reuse

pub mod aggregation;
pub mod app;
pub mod audio;
pub mod calendar;
pub mod config;
pub mod error;
pub mod flow;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use audio::AudioManager;
pub use error::{AppError, AppResult};
pub use flow::{FlowController, FlowEvent, FlowState, Screen};
pub use store::{AvailabilityStore, HttpAvailabilityStore, InMemoryStore};

use std::sync::Arc;

/// Everything the application needs at startup
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<dyn AvailabilityStore>,
    pub audio: Arc<AudioManager>,
}
