//! Unified error types for the finance tracker.
//!
//! All fallible operations in the crate return [`Result`], which wraps the
//! single [`Error`] enum defined here.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Mutation input was rejected by validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// A record lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name (e.g. "sale", "expense")
        entity: &'static str,
        /// The id that was looked up
        id: i64,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (export file handling).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet generation error.
    #[error("Spreadsheet error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization error (export output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::Validation`] with an owned message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
