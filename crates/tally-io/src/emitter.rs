//! # Report Emitter
//!
//! Renders an [`AggregateReport`] as text and writes it to two sinks.
//!
//! ## Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  === Sales Computation Results ===                                      │
//! │  Generated: 2026-10-18T09:30:00Z                                        │
//! │  Catalogue: data/priceCatalogue.json                                    │
//! │  Sales:     data/salesRecord.json                                       │
//! │                                                                         │
//! │  TOTAL COST: 2,481.86                                                   │
//! │                                                                         │
//! │  Errors (skipped):                                                      │
//! │  - Row 4: invalid quantity for 'Widget' ("abc") [InvalidQuantity]       │
//! │                                                                         │
//! │  Warnings (skipped):                                                    │
//! │  - Row 2: product not found: 'Gadget' [UnknownProduct]                  │
//! │                                                                         │
//! │  Catalogue entries skipped: 0                                           │
//! │                                                                         │
//! │  Elapsed time (s): 0.000042                                             │
//! │  ===============================                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The text is rendered ONCE and the same string goes to stdout and to the
//! result file, so the two are byte-for-byte identical.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tally_core::{AggregateReport, ErrorKind, LedgerRow, LineResult};
use tracing::debug;

use crate::error::{EmitError, EmitResult};

/// Result file written next to the working directory when none is configured.
pub const DEFAULT_RESULTS_FILE: &str = "SalesResults.txt";

const HEADER: &str = "=== Sales Computation Results ===";
const FOOTER: &str = "===============================";

// =============================================================================
// Report Context
// =============================================================================

/// Run details printed around the aggregate figures.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub catalog_path: PathBuf,
    pub ledger_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// 1-based positions of catalogue elements dropped at load time for
    /// lack of a title.
    pub catalog_skipped: Vec<usize>,
}

impl ReportContext {
    /// Creates a context stamped with the current time.
    pub fn new(catalog_path: impl Into<PathBuf>, ledger_path: impl Into<PathBuf>) -> Self {
        ReportContext {
            catalog_path: catalog_path.into(),
            ledger_path: ledger_path.into(),
            generated_at: Utc::now(),
            catalog_skipped: Vec::new(),
        }
    }

    pub fn with_catalog_skipped(mut self, positions: Vec<usize>) -> Self {
        self.catalog_skipped = positions;
        self
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the full report text, ending with a newline.
pub fn render(ctx: &ReportContext, report: &AggregateReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(
        out,
        "Generated: {}",
        ctx.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out, "Catalogue: {}", ctx.catalog_path.display());
    let _ = writeln!(out, "Sales:     {}", ctx.ledger_path.display());
    let _ = writeln!(out);
    let _ = writeln!(out, "TOTAL COST: {}", report.total());
    let _ = writeln!(out);

    let _ = writeln!(out, "Errors (skipped):");
    write_section(&mut out, report.errors());
    let _ = writeln!(out);

    let _ = writeln!(out, "Warnings (skipped):");
    write_section(&mut out, report.warnings());
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Catalogue entries skipped: {}",
        skipped_summary(&ctx.catalog_skipped)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Elapsed time (s): {:.6}",
        report.elapsed().as_secs_f64()
    );
    let _ = writeln!(out, "{FOOTER}");

    out
}

/// `0`, or the count followed by the positions: `2 (positions 3, 4)`.
fn skipped_summary(positions: &[usize]) -> String {
    if positions.is_empty() {
        return "0".to_string();
    }
    let listed: Vec<String> = positions.iter().map(usize::to_string).collect();
    format!("{} (positions {})", positions.len(), listed.join(", "))
}

fn write_section<'a>(out: &mut String, lines: impl Iterator<Item = &'a LineResult>) {
    let mut any = false;
    for line in lines {
        any = true;
        let _ = writeln!(out, "- {}", describe(line));
    }
    if !any {
        let _ = writeln!(out, "- None");
    }
}

/// One diagnostic line naming the row and the reason it was skipped.
pub fn describe(line: &LineResult) -> String {
    let kind = match line.error_kind() {
        Some(kind) => kind,
        None => return format!("Row {}: priced", line.position),
    };

    let detail = match (&line.row, kind) {
        (LedgerRow::Sale(record), ErrorKind::UnknownProduct) => {
            format!("product not found: '{}'", record.product)
        }
        (LedgerRow::Sale(record), ErrorKind::InvalidQuantity) => {
            format!(
                "invalid quantity for '{}' ({})",
                record.product, record.quantity
            )
        }
        (LedgerRow::Sale(record), ErrorKind::InvalidCatalogPrice) => {
            format!("catalogue price for '{}' is not a valid number", record.product)
        }
        (LedgerRow::Sale(record), ErrorKind::CostOverflow) => {
            format!("line cost for '{}' is out of range", record.product)
        }
        (LedgerRow::Malformed { raw, .. }, ErrorKind::NotAnObject) => {
            format!("not a sales row: {raw}")
        }
        (LedgerRow::Malformed { raw, .. }, _) => {
            format!("missing or invalid Product: {raw}")
        }
        (LedgerRow::Sale(record), _) => format!("'{}'", record.product),
    };

    format!("Row {}: {} [{}]", line.position, detail, kind)
}

// =============================================================================
// Output
// =============================================================================

/// Writes the rendered text to the console writer and to `path`.
///
/// Both sinks receive exactly `text`.
pub fn emit<W: Write>(text: &str, console: &mut W, path: impl AsRef<Path>) -> EmitResult<()> {
    let path = path.as_ref();

    console
        .write_all(text.as_bytes())
        .and_then(|_| console.flush())
        .map_err(EmitError::Console)?;

    fs::write(path, text).map_err(|source| EmitError::File {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = text.len(), "Report written");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
