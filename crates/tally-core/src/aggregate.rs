//! # Aggregate Module
//!
//! Joins ledger rows against the catalogue and totals the priced lines.
//!
//! ## Per-Row Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each LedgerRow, in input order                                     │
//! │                                                                         │
//! │   Malformed? ──────────────────────────► Rejected(NotAnObject |        │
//! │       │                                           MissingProduct)      │
//! │       ▼                                                                 │
//! │   Resolve product (exact match) ── miss ─► Rejected(UnknownProduct)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Parse quantity ─────────────── bad ───► Rejected(InvalidQuantity)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Catalogue price ────────────── bad ───► Rejected(InvalidCatalogPrice)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   line_cost = unit_price × quantity                                    │
//! │   total + line_cost finite? ──── no ────► Rejected(CostOverflow)       │
//! │   total    += line_cost                                                │
//! │                                                                         │
//! │   Every row, priced or rejected, is appended to the report.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pass never fails and never stops early. The only state is the report
//! being built, which is returned to the caller. The total is always finite.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::money::Amount;
use crate::types::{Catalog, LedgerRow};
use crate::validation;

// =============================================================================
// Line Results
// =============================================================================

/// What happened to a single ledger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOutcome {
    /// The row was priced and counted.
    Priced {
        unit_price: Amount,
        quantity: f64,
        line_cost: Amount,
    },
    /// The row was left out of the total.
    Rejected(ErrorKind),
}

/// A ledger row together with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    /// 1-based position of the row in the ledger array.
    pub position: usize,
    pub row: LedgerRow,
    pub outcome: LineOutcome,
}

impl LineResult {
    /// Line cost of a priced row.
    pub fn line_cost(&self) -> Option<Amount> {
        match self.outcome {
            LineOutcome::Priced { line_cost, .. } => Some(line_cost),
            LineOutcome::Rejected(_) => None,
        }
    }

    /// Error kind of a rejected row.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.outcome {
            LineOutcome::Priced { .. } => None,
            LineOutcome::Rejected(kind) => Some(kind),
        }
    }
}

// =============================================================================
// Aggregate Report
// =============================================================================

/// Result of one aggregation pass.
///
/// Built once by [`aggregate`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    total: Amount,
    lines: Vec<LineResult>,
    elapsed: Duration,
}

impl AggregateReport {
    /// Sum of `line_cost` over all priced rows.
    #[inline]
    pub fn total(&self) -> Amount {
        self.total
    }

    /// All rows in ledger order.
    #[inline]
    pub fn lines(&self) -> &[LineResult] {
        &self.lines
    }

    /// Wall-clock time spent in [`aggregate`].
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Rows that contributed to the total.
    pub fn priced(&self) -> impl Iterator<Item = &LineResult> {
        self.lines.iter().filter(|line| line.line_cost().is_some())
    }

    /// Rows that were left out of the total, in ledger order.
    pub fn rejected(&self) -> impl Iterator<Item = &LineResult> {
        self.lines.iter().filter(|line| line.error_kind().is_some())
    }

    /// Rejected rows whose kind is an error (malformed data).
    pub fn errors(&self) -> impl Iterator<Item = &LineResult> {
        self.rejected()
            .filter(|line| line.error_kind().is_some_and(|kind| !kind.is_warning()))
    }

    /// Rejected rows whose kind is a warning (unknown product).
    pub fn warnings(&self) -> impl Iterator<Item = &LineResult> {
        self.rejected()
            .filter(|line| line.error_kind().is_some_and(|kind| kind.is_warning()))
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }

    /// True when every row was priced.
    pub fn is_clean(&self) -> bool {
        self.rejected_count() == 0
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Prices every ledger row against the catalogue and totals the result.
///
/// ## Example
/// ```rust
/// use tally_core::{aggregate, Catalog, ErrorKind, LedgerRow, SaleRecord};
///
/// let mut catalog = Catalog::new();
/// catalog.insert_price("Widget", 10.0);
///
/// let rows: Vec<LedgerRow> = vec![
///     SaleRecord::new("Widget", 3).into(),
///     SaleRecord::new("Gadget", 1).into(),
/// ];
///
/// let report = aggregate(&catalog, &rows);
/// assert_eq!(report.total().value(), 30.0);
/// assert_eq!(report.lines()[1].error_kind(), Some(ErrorKind::UnknownProduct));
/// ```
pub fn aggregate(catalog: &Catalog, rows: &[LedgerRow]) -> AggregateReport {
    let started = Instant::now();

    let mut total = Amount::zero();
    let mut lines = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let outcome = match price_row(catalog, row) {
            LineOutcome::Priced { line_cost, .. } if !(total + line_cost).value().is_finite() => {
                LineOutcome::Rejected(ErrorKind::CostOverflow)
            }
            outcome => outcome,
        };
        if let LineOutcome::Priced { line_cost, .. } = outcome {
            total += line_cost;
        }
        lines.push(LineResult {
            position: index + 1,
            row: row.clone(),
            outcome,
        });
    }

    AggregateReport {
        total,
        lines,
        elapsed: started.elapsed(),
    }
}

/// Runs one row through resolve, validate and compute.
fn price_row(catalog: &Catalog, row: &LedgerRow) -> LineOutcome {
    let record = match row {
        LedgerRow::Sale(record) => record,
        LedgerRow::Malformed { defect, .. } => return LineOutcome::Rejected((*defect).into()),
    };

    let Some(catalog_price) = catalog.get(&record.product) else {
        return LineOutcome::Rejected(ErrorKind::UnknownProduct);
    };

    let Ok(quantity) = validation::parse_quantity(&record.quantity) else {
        return LineOutcome::Rejected(ErrorKind::InvalidQuantity);
    };

    match catalog_price.unit_price() {
        Ok(unit_price) => LineOutcome::Priced {
            unit_price,
            quantity,
            line_cost: unit_price.multiply_quantity(quantity),
        },
        Err(kind) => LineOutcome::Rejected(kind),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
