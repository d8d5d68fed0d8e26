//! # Domain Types
//!
//! Catalogue and ledger types shared by the loader, aggregator and emitter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │    Catalog      │   │  CatalogPrice   │       │
//! │  │  ─────────────  │──►│  ─────────────  │──►│  ─────────────  │       │
//! │  │  title          │   │  title → price  │   │  Valid(Amount)  │       │
//! │  │  price (raw)    │   │  last one wins  │   │  Invalid(raw)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   LedgerRow     │   │   SaleRecord    │   │   RowDefect     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Sale(record)   │──►│  product        │   │  NotAnObject    │       │
//! │  │  Malformed{..}  │   │  quantity (raw) │   │  MissingProduct │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw JSON values are kept for prices and quantities so that a bad cell is
//! reported when the row is priced, not when the file is read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, ValidationResult};
use crate::money::Amount;
use crate::validation::{self, PRICE_FIELD, PRODUCT_FIELD, QUANTITY_FIELD, TITLE_FIELD};

// =============================================================================
// Catalogue
// =============================================================================

/// One catalogue row as read from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product title, the join key.
    pub title: String,

    /// Unit price exactly as it appeared in the file.
    #[serde(default)]
    pub price: Value,
}

impl CatalogEntry {
    /// Creates an entry from a title and a raw price cell.
    pub fn new(title: impl Into<String>, price: impl Into<Value>) -> Self {
        CatalogEntry {
            title: title.into(),
            price: price.into(),
        }
    }

    /// Reads an entry out of one element of the catalogue array.
    ///
    /// Fails only when the element cannot be keyed: not an object, or no
    /// non-blank string `title`. A bad `price` is kept and judged later.
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        let title = validation::validate_product_name(TITLE_FIELD, value.get(TITLE_FIELD))?;
        Ok(CatalogEntry {
            title: title.to_string(),
            price: value.get(PRICE_FIELD).cloned().unwrap_or(Value::Null),
        })
    }

    /// Parses the raw price into a [`CatalogPrice`].
    pub fn catalog_price(&self) -> CatalogPrice {
        match validation::parse_price(&self.price) {
            Ok(price) => CatalogPrice::Valid(Amount::new(price)),
            Err(_) => CatalogPrice::Invalid(self.price.clone()),
        }
    }
}

/// Price state of a catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPrice {
    /// A finite, non-negative unit price.
    Valid(Amount),
    /// The raw cell that failed to parse.
    Invalid(Value),
}

impl CatalogPrice {
    /// Returns the unit price, or `InvalidCatalogPrice`.
    pub fn unit_price(&self) -> Result<Amount, ErrorKind> {
        match self {
            CatalogPrice::Valid(amount) => Ok(*amount),
            CatalogPrice::Invalid(_) => Err(ErrorKind::InvalidCatalogPrice),
        }
    }
}

/// Mapping from product title to unit price.
///
/// Titles are matched exactly: case-sensitive, no trimming. Inserting a title
/// that is already present replaces the earlier price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    prices: HashMap<String, CatalogPrice>,
}

impl Catalog {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Inserts an entry, returning the price it replaced if the title was
    /// already present.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogPrice> {
        let price = entry.catalog_price();
        self.prices.insert(entry.title, price)
    }

    /// Inserts a known-good price.
    pub fn insert_price(&mut self, title: impl Into<String>, price: f64) -> Option<CatalogPrice> {
        self.insert(CatalogEntry::new(title, price))
    }

    /// Looks a product up by exact title.
    #[inline]
    pub fn get(&self, title: &str) -> Option<&CatalogPrice> {
        self.prices.get(title)
    }

    /// Number of distinct titles.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Number of titles whose price failed to parse.
    pub fn invalid_price_count(&self) -> usize {
        self.prices
            .values()
            .filter(|p| matches!(p, CatalogPrice::Invalid(_)))
            .count()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// One well-formed sale from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Product")]
    pub product: String,

    /// Quantity exactly as it appeared in the file; `null` when absent.
    #[serde(rename = "Quantity", default)]
    pub quantity: Value,
}

impl SaleRecord {
    pub fn new(product: impl Into<String>, quantity: impl Into<Value>) -> Self {
        SaleRecord {
            product: product.into(),
            quantity: quantity.into(),
        }
    }
}

/// Why a ledger element could not become a [`SaleRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDefect {
    /// The element is not a JSON object.
    NotAnObject,
    /// The object lacks a non-blank string `Product`.
    MissingProduct,
}

impl From<RowDefect> for ErrorKind {
    fn from(defect: RowDefect) -> Self {
        match defect {
            RowDefect::NotAnObject => ErrorKind::NotAnObject,
            RowDefect::MissingProduct => ErrorKind::MissingProduct,
        }
    }
}

/// One element of the ledger array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerRow {
    Sale(SaleRecord),
    Malformed { raw: Value, defect: RowDefect },
}

impl LedgerRow {
    /// Classifies one element of the ledger array.
    ///
    /// ## Example
    /// ```rust
    /// use serde_json::json;
    /// use tally_core::{LedgerRow, RowDefect};
    ///
    /// let row = LedgerRow::from_value(json!({"Product": "Widget", "Quantity": 2}));
    /// assert!(matches!(row, LedgerRow::Sale(_)));
    ///
    /// let row = LedgerRow::from_value(json!("Widget"));
    /// assert!(matches!(row, LedgerRow::Malformed { defect: RowDefect::NotAnObject, .. }));
    /// ```
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return LedgerRow::Malformed {
                raw: value,
                defect: RowDefect::NotAnObject,
            };
        }

        let product = validation::validate_product_name(PRODUCT_FIELD, value.get(PRODUCT_FIELD))
            .map(str::to_string);
        let product = match product {
            Ok(product) => product,
            Err(_) => {
                return LedgerRow::Malformed {
                    raw: value,
                    defect: RowDefect::MissingProduct,
                }
            }
        };

        let quantity = value.get(QUANTITY_FIELD).cloned().unwrap_or(Value::Null);
        LedgerRow::Sale(SaleRecord { product, quantity })
    }
}

impl From<SaleRecord> for LedgerRow {
    fn from(record: SaleRecord) -> Self {
        LedgerRow::Sale(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_last_title_wins() {
        let catalog: Catalog = vec![
            CatalogEntry::new("Widget", 10.0),
            CatalogEntry::new("Gadget", 3.0),
            CatalogEntry::new("Widget", 12.5),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Widget"),
            Some(&CatalogPrice::Valid(Amount::new(12.5)))
        );
    }

    #[test]
    fn test_catalog_insert_reports_replacement() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert_price("Widget", 1.0).is_none());
        assert!(catalog.insert_price("Widget", 2.0).is_some());
    }

    #[test]
    fn test_catalog_lookup_is_exact() {
        let mut catalog = Catalog::new();
        catalog.insert_price("Widget", 1.0);

        assert!(catalog.get("Widget").is_some());
        assert!(catalog.get("widget").is_none());
        assert!(catalog.get(" Widget").is_none());
    }

    #[test]
    fn test_invalid_price_is_kept() {
        let mut catalog = Catalog::new();
        catalog.insert(CatalogEntry::new("Broken", "n/a"));
        catalog.insert(CatalogEntry::new("Negative", -4.0));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.invalid_price_count(), 2);
        assert_eq!(
            catalog.get("Broken").map(CatalogPrice::unit_price),
            Some(Err(ErrorKind::InvalidCatalogPrice))
        );
    }

    #[test]
    fn test_catalog_entry_from_value() {
        let entry = CatalogEntry::from_value(&json!({"title": "Widget", "price": 9.5})).unwrap();
        assert_eq!(entry, CatalogEntry::new("Widget", 9.5));

        let no_price = CatalogEntry::from_value(&json!({"title": "Widget"})).unwrap();
        assert_eq!(no_price.price, Value::Null);

        assert!(CatalogEntry::from_value(&json!({"price": 1})).is_err());
        assert!(CatalogEntry::from_value(&json!({"title": ""})).is_err());
        assert!(CatalogEntry::from_value(&json!(3)).is_err());
    }

    #[test]
    fn test_ledger_row_from_value() {
        let row = LedgerRow::from_value(json!({"Product": "Widget", "Quantity": "abc"}));
        assert_eq!(row, LedgerRow::Sale(SaleRecord::new("Widget", "abc")));

        let row = LedgerRow::from_value(json!({"Product": "Widget"}));
        assert_eq!(row, LedgerRow::Sale(SaleRecord::new("Widget", Value::Null)));

        let row = LedgerRow::from_value(json!({"Quantity": 1}));
        assert!(matches!(
            row,
            LedgerRow::Malformed {
                defect: RowDefect::MissingProduct,
                ..
            }
        ));

        let row = LedgerRow::from_value(json!([1, 2]));
        assert!(matches!(
            row,
            LedgerRow::Malformed {
                defect: RowDefect::NotAnObject,
                ..
            }
        ));
    }

    #[test]
    fn test_ledger_field_names_are_case_sensitive() {
        let row = LedgerRow::from_value(json!({"product": "Widget", "quantity": 1}));
        assert!(matches!(
            row,
            LedgerRow::Malformed {
                defect: RowDefect::MissingProduct,
                ..
            }
        ));
    }
}
