//! # Validation Module
//!
//! Cell-level parsers for catalogue and ledger values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: tally-io loader                                              │
//! │  ├── File readable, valid JSON                                         │
//! │  └── Top level is an array (otherwise the run aborts)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Row shape (types.rs)                                         │
//! │  ├── Element is an object                                              │
//! │  └── Product / title present and non-blank                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Quantity is a finite number (sign allowed)                        │
//! │  └── Price is a finite, non-negative number                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Accepted Numeric Encodings
//! A JSON number, or a JSON string holding a number (`"3"`, `" 2.5 "`).
//! Booleans, arrays, objects and `null` are rejected.
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use tally_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity(&json!(-2)).unwrap(), -2.0);
//! assert!(parse_quantity(&json!("abc")).is_err());
//! assert!(parse_price(&json!(-1.0)).is_err());
//! ```

use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};

/// Ledger field holding the product name.
pub const PRODUCT_FIELD: &str = "Product";

/// Ledger field holding the quantity.
pub const QUANTITY_FIELD: &str = "Quantity";

/// Catalogue field holding the product title.
pub const TITLE_FIELD: &str = "title";

/// Catalogue field holding the unit price.
pub const PRICE_FIELD: &str = "price";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name or catalogue title.
///
/// ## Rules
/// - Must be a JSON string
/// - Must contain at least one non-whitespace character
///
/// The returned name is NOT trimmed: lookups are exact.
pub fn validate_product_name<'a>(
    field: &str,
    value: Option<&'a Value>,
) -> ValidationResult<&'a str> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.as_str()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a JSON value into a finite `f64`.
fn parse_finite(field: &str, value: &Value) -> ValidationResult<f64> {
    let number = match value {
        Value::Null => {
            return Err(ValidationError::Required {
                field: field.to_string(),
            })
        }
        Value::Number(n) => n.as_f64().ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            value: n.to_string(),
        })?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                });
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidFormat {
                    field: field.to_string(),
                    value: s.clone(),
                })?
        }
        Value::Bool(_) => {
            return Err(ValidationError::NotNumeric {
                field: field.to_string(),
                found: "boolean".to_string(),
            })
        }
        Value::Array(_) => {
            return Err(ValidationError::NotNumeric {
                field: field.to_string(),
                found: "array".to_string(),
            })
        }
        Value::Object(_) => {
            return Err(ValidationError::NotNumeric {
                field: field.to_string(),
                found: "object".to_string(),
            })
        }
    };

    if !number.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(number)
}

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be present and numeric
/// - Must be finite
/// - Zero is allowed (contributes nothing)
/// - Negative is allowed (a return or adjustment)
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(&json!(5)).unwrap(), 5.0);
/// assert_eq!(parse_quantity(&json!(0)).unwrap(), 0.0);
/// assert_eq!(parse_quantity(&json!("-3")).unwrap(), -3.0);
/// assert!(parse_quantity(&json!(null)).is_err());
/// ```
pub fn parse_quantity(value: &Value) -> ValidationResult<f64> {
    parse_finite(QUANTITY_FIELD, value)
}

/// Validates a catalogue price.
///
/// ## Rules
/// - Must be present and numeric
/// - Must be finite
/// - Must be non-negative (zero is a free item)
pub fn parse_price(value: &Value) -> ValidationResult<f64> {
    let price = parse_finite(PRICE_FIELD, value)?;
    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: PRICE_FIELD.to_string(),
            value: price,
        });
    }
    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_quantity_accepts_numbers() {
        assert_eq!(parse_quantity(&json!(1)).unwrap(), 1.0);
        assert_eq!(parse_quantity(&json!(2.5)).unwrap(), 2.5);
        assert_eq!(parse_quantity(&json!(0)).unwrap(), 0.0);
        assert_eq!(parse_quantity(&json!(-4)).unwrap(), -4.0);
    }

    #[test]
    fn test_parse_quantity_accepts_numeric_strings() {
        assert_eq!(parse_quantity(&json!("7")).unwrap(), 7.0);
        assert_eq!(parse_quantity(&json!(" 1.5 ")).unwrap(), 1.5);
        assert_eq!(parse_quantity(&json!("-2")).unwrap(), -2.0);
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert!(matches!(
            parse_quantity(&json!("abc")),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!(null)),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!("  ")),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!(true)),
            Err(ValidationError::NotNumeric { .. })
        ));
        assert!(parse_quantity(&json!([1])).is_err());
        assert!(parse_quantity(&json!({"n": 1})).is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_non_finite_strings() {
        assert!(matches!(
            parse_quantity(&json!("NaN")),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_quantity(&json!("inf")),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(&json!(28.1)).unwrap(), 28.1);
        assert_eq!(parse_price(&json!(0)).unwrap(), 0.0);
        assert_eq!(parse_price(&json!("3.99")).unwrap(), 3.99);

        assert!(matches!(
            parse_price(&json!(-1)),
            Err(ValidationError::Negative { .. })
        ));
        assert!(parse_price(&json!("free")).is_err());
        assert!(parse_price(&json!(null)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        let name = json!("Widget");
        assert_eq!(validate_product_name(PRODUCT_FIELD, Some(&name)).unwrap(), "Widget");

        let padded = json!(" Widget ");
        assert_eq!(
            validate_product_name(PRODUCT_FIELD, Some(&padded)).unwrap(),
            " Widget "
        );

        assert!(validate_product_name(PRODUCT_FIELD, None).is_err());
        assert!(validate_product_name(PRODUCT_FIELD, Some(&json!("   "))).is_err());
        assert!(validate_product_name(PRODUCT_FIELD, Some(&json!(42))).is_err());
    }
}
