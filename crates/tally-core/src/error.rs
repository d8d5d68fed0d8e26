//! # Error Types
//!
//! Domain error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core (this file)                                                │
//! │  ├── ErrorKind        - Why a ledger row was left out of the total     │
//! │  └── ValidationError  - Why a single cell failed to parse              │
//! │                                                                         │
//! │  tally-io (separate crate)                                             │
//! │  ├── LoadError        - Input file unreadable / not a JSON array       │
//! │  └── EmitError        - Result file could not be written               │
//! │                                                                         │
//! │  Flow: ValidationError → ErrorKind → LineResult → report line          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ErrorKind` is data, not a failure: a rejected row is recorded in the
//! report and aggregation carries on with the next row.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Row Error Kind
// =============================================================================

/// Reason a ledger row did not contribute to the total.
///
/// ## Severity
/// ```text
/// UnknownProduct       → warning  (row is well-formed, product not sold here)
/// InvalidQuantity      → error    (row is malformed)
/// InvalidCatalogPrice  → error    (catalogue entry is malformed)
/// NotAnObject          → error    (ledger element is not a JSON object)
/// MissingProduct       → error    (no usable "Product" field)
/// CostOverflow         → error    (line cost or running total not finite)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The sale names a product that is absent from the catalogue.
    UnknownProduct,
    /// The quantity is missing or not a finite number.
    InvalidQuantity,
    /// The catalogue entry for the product has an unparseable price.
    InvalidCatalogPrice,
    /// The ledger element is not an object at all.
    NotAnObject,
    /// The ledger element has no non-blank string `Product`.
    MissingProduct,
    /// Pricing the row would push the line cost or the running total past
    /// the range of an `f64`.
    CostOverflow,
}

impl ErrorKind {
    /// Whether this kind is reported as a warning rather than an error.
    #[inline]
    pub const fn is_warning(&self) -> bool {
        matches!(self, ErrorKind::UnknownProduct)
    }

    /// Stable identifier used in report lines.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownProduct => "UnknownProduct",
            ErrorKind::InvalidQuantity => "InvalidQuantity",
            ErrorKind::InvalidCatalogPrice => "InvalidCatalogPrice",
            ErrorKind::NotAnObject => "NotAnObject",
            ErrorKind::MissingProduct => "MissingProduct",
            ErrorKind::CostOverflow => "CostOverflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Cell-level validation errors.
///
/// Returned by the parsers in [`crate::validation`]. The aggregator folds
/// these into an [`ErrorKind`] for the row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing, null or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field holds a JSON type that cannot carry a number.
    #[error("{field} must be a number, got {found}")]
    NotNumeric { field: String, found: String },

    /// Field is a string that does not parse as a number.
    #[error("{field} has invalid format: {value:?}")]
    InvalidFormat { field: String, value: String },

    /// Field parsed to NaN or infinity.
    #[error("{field} must be finite")]
    NotFinite { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_severity() {
        assert!(ErrorKind::UnknownProduct.is_warning());
        assert!(!ErrorKind::InvalidQuantity.is_warning());
        assert!(!ErrorKind::InvalidCatalogPrice.is_warning());
        assert!(!ErrorKind::NotAnObject.is_warning());
        assert!(!ErrorKind::MissingProduct.is_warning());
        assert!(!ErrorKind::CostOverflow.is_warning());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::InvalidCatalogPrice.to_string(), "InvalidCatalogPrice");
        assert_eq!(ErrorKind::UnknownProduct.to_string(), "UnknownProduct");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Quantity".to_string(),
        };
        assert_eq!(err.to_string(), "Quantity is required");

        let err = ValidationError::InvalidFormat {
            field: "Quantity".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Quantity has invalid format: \"abc\"");
    }
}
