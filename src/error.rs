//! Custom error types for billing-notice
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for billing-notice operations
#[derive(Error, Debug)]
pub enum BillingError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for entity fields (names, references)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Charge data rejected by the validation rule
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Nothing to bill for an account
    #[error("No charges found: {0}")]
    EmptyResult(String),

    /// The rule chain ran out of rules without producing a cost
    #[error("Failed to process charge {charge}: no rule produced a cost")]
    Unresolved { charge: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BillingError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for streets
    pub fn street_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Street",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for services
    pub fn service_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Service",
            identifier: identifier.into(),
        }
    }

    /// Negative (or otherwise unusable) quantity on a charge
    pub fn negative_quantity(charge: impl std::fmt::Display) -> Self {
        Self::InvalidInput(format!("negative quantity for charge {}", charge))
    }

    /// Negative (or otherwise unusable) tariff on a service
    pub fn negative_tariff(service: impl std::fmt::Display) -> Self {
        Self::InvalidInput(format!("negative tariff for service {}", service))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is an empty result error
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult(_))
    }
}

impl From<std::io::Error> for BillingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for billing-notice operations
pub type BillingResult<T> = Result<T, BillingError>;
