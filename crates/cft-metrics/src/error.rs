//! Error types for the metrics core

use thiserror::Error;

/// Result type alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Main error type for the metrics core
#[derive(Error, Debug, Clone)]
pub enum MetricsError {
    /// Tracker construction or global accessor misconfiguration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reporting against an agent id that was never registered
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl MetricsError {
    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a new unknown-agent error
    pub fn unknown_agent(agent_id: impl Into<String>) -> Self {
        Self::UnknownAgent(agent_id.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<std::io::Error> for MetricsError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
