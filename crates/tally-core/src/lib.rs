//! # tally-core: Pure Sales Aggregation
//!
//! This crate is the **heart** of Sales Tally. It joins a product catalogue
//! against a sales ledger and totals the result, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sales Tally Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    compute-sales (apps/cli)                     │   │
//! │  │        args ──► config ──► load ──► aggregate ──► emit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  tally-io (loaders + emitter)                   │   │
//! │  │        catalogue.json ──► Catalog   ledger.json ──► rows        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ aggregate │  │ validation│  │   │
//! │  │   │  Catalog  │  │  Amount   │  │  Report   │  │  quantity │  │   │
//! │  │   │ LedgerRow │  │           │  │ LineResult│  │   price   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CONSOLE • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalogue and ledger types
//! - [`money`] - `Amount` newtype for monetary figures
//! - [`error`] - Row error kinds and validation errors
//! - [`validation`] - Quantity, price and product-name checks
//! - [`aggregate`] - The join-and-total pass
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{aggregate, Amount, Catalog, LedgerRow, SaleRecord};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert_price("Widget", 10.0);
//!
//! let rows = vec![
//!     LedgerRow::Sale(SaleRecord::new("Widget", 5)),
//!     LedgerRow::Sale(SaleRecord::new("Widget", -2)),
//! ];
//!
//! let report = aggregate(&catalog, &rows);
//! assert!(report.total().approx_eq(Amount::new(30.0)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate, AggregateReport, LineOutcome, LineResult};
pub use error::{ErrorKind, ValidationError};
pub use money::Amount;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tolerance used when comparing two totals.
///
/// Totals are sums of `f64` products, so two orderings of the same rows can
/// differ in the last bits.
pub const AMOUNT_EPSILON: f64 = 1e-6;
