//! # Loaders
//!
//! Reads the catalogue and ledger JSON files.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Whole file                            │  Single element                │
//! │  ──────────────────────────────────    │  ───────────────────────────   │
//! │  unreadable        → LoadError::Read   │  catalogue: no usable title    │
//! │  invalid JSON      → LoadError::Parse  │    → skipped, counted, warned  │
//! │  top level ≠ array → NotAnArray        │  catalogue: bad price          │
//! │                                        │    → kept as Invalid, judged   │
//! │  The run stops.                        │      when a sale references it │
//! │                                        │  ledger: any shape             │
//! │                                        │    → LedgerRow, judged later   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tally_core::{Catalog, CatalogEntry, LedgerRow};
use tracing::{debug, info, warn};

use crate::error::{LoadError, LoadResult};

// =============================================================================
// Catalogue
// =============================================================================

/// A catalogue plus what happened while building it.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,

    /// Number of elements in the source array.
    pub entries_read: usize,

    /// 1-based positions of elements that could not be keyed by title.
    pub skipped: Vec<usize>,

    /// Number of entries that replaced an earlier entry with the same title.
    pub duplicates: usize,
}

/// Reads a catalogue file: a JSON array of `{"title": .., "price": ..}`.
pub fn load_catalog(path: impl AsRef<Path>) -> LoadResult<CatalogLoad> {
    let path = path.as_ref();
    let items = read_json_array(path)?;
    let load = build_catalog(items);

    info!(
        path = %path.display(),
        products = load.catalog.len(),
        skipped = load.skipped.len(),
        duplicates = load.duplicates,
        invalid_prices = load.catalog.invalid_price_count(),
        "Catalogue loaded"
    );

    Ok(load)
}

/// Builds a catalogue from already-parsed array elements.
///
/// Later titles replace earlier ones.
pub fn build_catalog(items: Vec<Value>) -> CatalogLoad {
    let mut load = CatalogLoad {
        entries_read: items.len(),
        ..CatalogLoad::default()
    };

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        match CatalogEntry::from_value(item) {
            Ok(entry) => {
                let title = entry.title.clone();
                if load.catalog.insert(entry).is_some() {
                    debug!(position, %title, "Duplicate catalogue title, keeping the later entry");
                    load.duplicates += 1;
                }
            }
            Err(e) => {
                warn!(position, error = %e, "Skipping catalogue entry");
                load.skipped.push(position);
            }
        }
    }

    load
}

// =============================================================================
// Ledger
// =============================================================================

/// Reads a ledger file: a JSON array of `{"Product": .., "Quantity": ..}`.
///
/// Every element is kept, including malformed ones, so that the report can
/// list them in order.
pub fn load_ledger(path: impl AsRef<Path>) -> LoadResult<Vec<LedgerRow>> {
    let path = path.as_ref();
    let rows: Vec<LedgerRow> = read_json_array(path)?
        .into_iter()
        .map(LedgerRow::from_value)
        .collect();

    info!(path = %path.display(), rows = rows.len(), "Ledger loaded");
    Ok(rows)
}

// =============================================================================
// Helpers
// =============================================================================

fn read_json_array(path: &Path) -> LoadResult<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
