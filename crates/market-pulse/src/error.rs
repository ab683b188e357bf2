//! Error types for collection operations

use thiserror::Error;

/// Errors produced while collecting price or sentiment data
#[derive(Debug, Error)]
pub enum PulseError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// The discussion source rejected our credentials
    #[error("Auth error: {0}")]
    AuthError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Querying or paging a single forum failed
    #[error("Forum query failed for r/{forum}: {reason}")]
    ForumQuery {
        forum: String,
        reason: String,
    },

    /// A forum exceeded its time budget
    #[error("Forum r/{forum} exceeded its deadline")]
    ForumDeadline {
        forum: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// CSV export error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, PulseError>;
