// Declare modules
pub mod availability;
pub mod participant;
pub mod settings;

// Re-export all public types so callers can write `use crate::models::AvailabilityRecord`.
pub use availability::{
    format_date, toggled, AvailabilityRecord, AvailabilityRequest,
    AvailabilityResponse, DATE_FORMAT,
};
pub use participant::{find_participant, is_participant, PARTICIPANTS};
pub use settings::Settings;
