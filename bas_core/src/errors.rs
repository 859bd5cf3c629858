//! # Error Types
//!
//! Structured error types for bas_core.
//!
//! Calculators themselves never fail: an invalid input produces a blank
//! output (see [`crate::output`]). These errors only surface at the edges of
//! the crate, such as looking up a calculator by id or reading a worksheet
//! file from disk.
//!
//! ## Example
//!
//! ```rust
//! use bas_core::errors::{CalcError, CalcResult};
//!
//! fn require_known(id: &str) -> CalcResult<()> {
//!     if id != "valve-cv" {
//!         return Err(CalcError::unknown_calculator(id));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_known("valve-cv").is_ok());
//! assert_eq!(require_known("nope").unwrap_err().error_code(), "UNKNOWN_CALCULATOR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bas_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for the non-calculator edges of the crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// No calculator is registered under this id
    #[error("Unknown calculator: {id}")]
    UnknownCalculator { id: String },

    /// A worksheet entry id does not exist
    #[error("Worksheet entry not found: {id}")]
    EntryNotFound { id: String },

    /// A raw `name=value` argument could not be split
    #[error("Malformed input assignment '{raw}' - expected name=value")]
    MalformedAssignment { raw: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an UnknownCalculator error
    pub fn unknown_calculator(id: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { id: id.into() }
    }

    /// Create an EntryNotFound error
    pub fn entry_not_found(id: impl Into<String>) -> Self {
        CalcError::EntryNotFound { id: id.into() }
    }

    /// Create a MalformedAssignment error
    pub fn malformed_assignment(raw: impl Into<String>) -> Self {
        CalcError::MalformedAssignment { raw: raw.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            CalcError::MalformedAssignment { .. } => "MALFORMED_ASSIGNMENT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
