//! Unified error types for the tracker.
//!
//! Store mutations never surface these to the user; they show up at the
//! boundaries that are allowed to fail: configuration, form validation,
//! and user-initiated import.

use thiserror::Error;
use uuid::Uuid;

/// Every error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A form field is missing or does not parse
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending form field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A money amount is negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// An import bundle was rejected as a whole
    #[error("Failed to import data: {message}")]
    Import {
        /// Decoder message
        message: String,
    },

    /// No letter with this id exists
    #[error("Letter not found: {id}")]
    LetterNotFound {
        /// The id that was looked up
        id: Uuid,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
