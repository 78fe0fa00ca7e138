//! Error types for the alert backend

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// A dependency that is not configured or not reachable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream service answered with an error
    #[error("External service error: {0}")]
    External(String),

    /// Real-time channel errors (delivery, framing)
    #[error("Channel error: {0}")]
    Channel(String),

    /// Scheduler lifecycle errors
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// Migration errors
    #[error("Migration error: {0}")]
    Migration(String),
}
