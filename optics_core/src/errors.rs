//! # Error Types
//!
//! Structured error types for optics_core. Every failure an evaluation can
//! produce is one of these variants, so a front end can show the message to
//! the user or hand the JSON form to another program.
//!
//! ## Example
//!
//! ```rust
//! use optics_core::errors::{CalcError, CalcResult};
//!
//! fn validate_rep_rate(rep_rate_hz: f64) -> CalcResult<()> {
//!     if rep_rate_hz <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "rep_rate",
//!             rep_rate_hz.to_string(),
//!             "Repetition rate must be greater than 0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_rep_rate(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for optics_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for formula evaluation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Unit symbol is not in the unit table
    #[error("Unknown unit: '{unit}'")]
    UnknownUnit { unit: String },

    /// Unit exists but measures a different physical dimension
    #[error("Unit '{unit}' for '{field}' is a {actual} unit, expected {expected}")]
    DimensionMismatch {
        field: String,
        unit: String,
        expected: String,
        actual: String,
    },

    /// An input value violates a positivity or range constraint
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A derived sine/cosine argument fell outside [-1, 1]
    #[error("No real solution for '{quantity}': {reason}")]
    NoRealSolution { quantity: String, reason: String },

    /// A derived geometric quantity came out non-physical (e.g. spacing <= 0)
    #[error("Non-physical result for '{quantity}' ({value}): {reason}")]
    NonPhysicalResult {
        quantity: String,
        value: String,
        reason: String,
    },

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
}

impl CalcError {
    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(
        field: impl Into<String>,
        unit: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CalcError::DimensionMismatch {
            field: field.into(),
            unit: unit.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoRealSolution error
    pub fn no_real_solution(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NoRealSolution {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonPhysicalResult error
    pub fn non_physical(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NonPhysicalResult {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the values the user typed, which they can
    /// fix and resubmit. Unknown units and file problems are not in this group.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::NoRealSolution { .. }
                | CalcError::NonPhysicalResult { .. }
                | CalcError::DimensionMismatch { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NoRealSolution { .. } => "NO_REAL_SOLUTION",
            CalcError::NonPhysicalResult { .. } => "NON_PHYSICAL_RESULT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("rep_rate", "0", "Repetition rate must be greater than 0");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_unit("furlong").error_code(), "UNKNOWN_UNIT");
        assert_eq!(
            CalcError::no_real_solution("theta_m", "sin > 1").error_code(),
            "NO_REAL_SOLUTION"
        );
        assert_eq!(
            CalcError::non_physical("d", "-1e-6", "check sign convention").error_code(),
            "NON_PHYSICAL_RESULT"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_input("na", "0", "NA must be greater than 0").is_input_error());
        assert!(!CalcError::unknown_unit("furlong").is_input_error());
        assert!(!CalcError::file_error("open", "x.json", "missing").is_input_error());
    }

    #[test]
    fn test_display_message() {
        let error = CalcError::unknown_unit("furlong");
        assert_eq!(error.to_string(), "Unknown unit: 'furlong'");
    }
}
