use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the error reached the store over the wire at all.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Network(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Network(_) | Self::Anyhow(_) | Self::Serialization(_) | Self::Io(_) => false,
            Self::Store(_)
            | Self::InvalidInput(_)
            | Self::Config(_)
            | Self::NotFound(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Network(_) => "Network request failed".to_string(),
                Self::Serialization(_) => "Malformed response".to_string(),
                Self::Io(_) => "File operation failed".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                _ => self.to_string(),
            }
        }
    }

    /// Text shown in the dismissible notification when loading availability fails.
    pub fn user_message(&self, api_base_url: &str) -> String {
        if self.is_connectivity() {
            format!(
                "Backend-Verbindung fehlgeschlagen. Stelle sicher, dass der Backend-Server auf {} läuft.",
                api_base_url
            )
        } else {
            format!(
                "Fehler beim Laden der Verfügbarkeiten: {}",
                self.to_safe_string()
            )
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
