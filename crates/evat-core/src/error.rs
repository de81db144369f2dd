//! Unified error types for the EVAT ecosystem
//!
//! This module provides a common error type [`EvatError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `EvatError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use evat_core::{EvatError, EvatResult};
//!
//! fn score_dataset(path: &str) -> EvatResult<()> {
//!     let records = load_adoption_csv(path)?;
//!     rank_states(&records)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all EVAT operations.
///
/// This enum provides a common error representation across ingestion,
/// aggregation, scoring, and forecasting, allowing errors to be handled
/// uniformly at the CLI boundary.
///
/// Empty input is never an error anywhere in the toolkit: scoring an empty
/// set of states yields an empty result. The two forecaster conditions get
/// dedicated variants so callers can distinguish "not enough observations"
/// from "observations with no predictor variance" when explaining a missing
/// chart to the user.
#[derive(Error, Debug)]
pub enum EvatError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors (missing columns, malformed rows)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Forecaster given fewer than two distinct years
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Forecaster given observations with zero predictor variance
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// Configuration errors (bad weights, bad year range)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using EvatError.
pub type EvatResult<T> = Result<T, EvatError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for EvatError {
    fn from(err: anyhow::Error) -> Self {
        EvatError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for EvatError {
    fn from(s: String) -> Self {
        EvatError::Other(s)
    }
}

impl From<&str> for EvatError {
    fn from(s: &str) -> Self {
        EvatError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for EvatError {
    fn from(err: serde_json::Error) -> Self {
        EvatError::Parse(err.to_string())
    }
}
