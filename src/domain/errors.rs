//! Domain error types
//!
//! This module defines the error hierarchy for Tombola.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Tombola error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TombolaError {
    /// Bad caller input (digit count, page size, body, identifier)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The addressed record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// More unique codes were requested than the digit width can address
    #[error(
        "Cannot issue {requested} unique codes with {digit_count} digits: only {available} available"
    )]
    RangeExhausted {
        digit_count: u32,
        requested: u64,
        available: u64,
    },

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl TombolaError {
    /// Returns true for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TombolaError::InvalidArgument(_)
                | TombolaError::NotFound(_)
                | TombolaError::RangeExhausted { .. }
        )
    }
}

/// Key-value store errors
///
/// Errors that occur when talking to the backing store.
/// These errors don't expose driver or pool types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Failed to create a table
    #[error("Failed to create table: {0}")]
    TableCreationFailed(String),

    /// Failed to write one or more items
    #[error("Failed to write items: {0}")]
    WriteFailed(String),

    /// Failed to read an item
    #[error("Failed to read item: {0}")]
    ReadFailed(String),

    /// Failed to delete one or more items
    #[error("Failed to delete items: {0}")]
    DeleteFailed(String),

    /// Failed to scan a table
    #[error("Failed to scan table: {0}")]
    ScanFailed(String),

    /// The store rejected the request for capacity reasons
    #[error("Request throttled: {0}")]
    Throttled(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// A stored or submitted document has the wrong shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TombolaError {
    fn from(err: std::io::Error) -> Self {
        TombolaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TombolaError {
    fn from(err: serde_json::Error) -> Self {
        TombolaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TombolaError {
    fn from(err: toml::de::Error) -> Self {
        TombolaError::Configuration(format!("TOML parse error: {err}"))
    }
}
