//! Error types for opsboard.
//!
//! This module defines all error types used throughout the opsboard crate.
//! Pipeline stages themselves never fail; these errors come from boundary
//! validation, store mutations, seed loading and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for opsboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Schema Errors ===
    /// A field is not declared on the entity schema.
    #[error("unknown field '{field}' on {entity}")]
    UnknownField {
        /// Entity the field was looked up on.
        entity: &'static str,
        /// The field name.
        field: String,
    },

    /// A filter key is not declared on the entity schema.
    #[error("unknown filter '{key}' on {entity}")]
    UnknownFilter {
        /// Entity the filter was applied to.
        entity: &'static str,
        /// The filter key.
        key: String,
    },

    /// A filter value is neither a valid option nor the "all" sentinel.
    #[error("invalid value '{value}' for filter '{key}' (expected one of: {expected})")]
    InvalidFilterValue {
        /// The filter key.
        key: String,
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        expected: String,
    },

    /// A filter argument could not be parsed as `key=value`.
    #[error("invalid filter '{0}', expected KEY=VALUE")]
    FilterSyntax(String),

    // === Store Errors ===
    /// A status transition named a status the entity does not define.
    #[error("invalid status '{status}' for {entity}")]
    InvalidStatus {
        /// Entity the transition was applied to.
        entity: &'static str,
        /// The rejected status.
        status: String,
    },

    /// The entity has no status field, so status transitions are unsupported.
    #[error("{entity} records have no status field")]
    NoStatusField {
        /// The entity.
        entity: &'static str,
    },

    /// No record with the given id exists in the store.
    #[error("no {entity} record with id '{id}'")]
    RecordNotFound {
        /// The entity.
        entity: &'static str,
        /// The missing id.
        id: String,
    },

    /// A record was supplied without an id where one is required.
    #[error("{entity} record is missing an id")]
    MissingId {
        /// The entity.
        entity: &'static str,
    },

    /// Two records share an id.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId {
        /// The entity.
        entity: &'static str,
        /// The duplicated id.
        id: String,
    },

    // === Seed Errors ===
    /// Failed to read or parse a seed or script file.
    #[error("failed to load {path}: {message}")]
    SeedLoad {
        /// The file that failed.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for opsboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(entity: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity,
            field: field.into(),
        }
    }

    /// Create a record not found error.
    #[must_use]
    pub fn record_not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a seed load error.
    #[must_use]
    pub fn seed_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SeedLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error is a rejected input value.
    ///
    /// Covers list queries naming something the entity schema does not
    /// define, and configuration values that fail validation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::UnknownFilter { .. }
                | Self::InvalidFilterValue { .. }
                | Self::ConfigValidation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unknown_field("incidents", "colour");
        assert_eq!(err.to_string(), "unknown field 'colour' on incidents");
    }

    #[test]
    fn test_invalid_filter_value_display() {
        let err = Error::InvalidFilterValue {
            key: "status".to_string(),
            value: "Lost".to_string(),
            expected: "Active, Returned".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Lost"));
        assert!(msg.contains("Active, Returned"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::record_not_found("lending", "7").is_not_found());
        assert!(!Error::unknown_field("lending", "x").is_not_found());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::unknown_field("incidents", "x").is_validation_error());
        let err = Error::UnknownFilter {
            entity: "contacts",
            key: "zone".to_string(),
        };
        assert!(err.is_validation_error());
        assert!(!Error::record_not_found("contacts", "1").is_validation_error());
    }

    #[test]
    fn test_config_validation_is_validation_error() {
        let err = Error::ConfigValidation {
            message: "page_size must be greater than 0".to_string(),
        };
        assert!(err.is_validation_error());
        assert!(!Error::FilterSyntax("status".to_string()).is_validation_error());
    }

    #[test]
    fn test_duplicate_id_display() {
        let err = Error::DuplicateId {
            entity: "personnel",
            id: "3".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate personnel id '3'");
    }

    #[test]
    fn test_seed_load_display() {
        let err = Error::seed_load("/data/incidents.json", "expected an array");
        let msg = err.to_string();
        assert!(msg.contains("/data/incidents.json"));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn test_filter_syntax_display() {
        let err = Error::FilterSyntax("status".to_string());
        assert!(err.to_string().contains("KEY=VALUE"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "page_size must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("page_size"));
    }
}
