//! # tally-io: File Layer for Sales Tally
//!
//! Reads the catalogue and ledger, and writes the finished report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sales Tally Data Flow                            │
//! │                                                                         │
//! │  catalogue.json        ledger.json                                      │
//! │       │                     │                                           │
//! │       ▼                     ▼                                           │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-io (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                     ┌───────────────┐      │   │
//! │  │   │    loader     │  Catalog, rows ──►  │   emitter     │      │   │
//! │  │   │ load_catalog  │   tally-core        │   render      │      │   │
//! │  │   │ load_ledger   │   aggregate()  ──►  │   emit        │      │   │
//! │  │   └───────────────┘                     └───────┬───────┘      │   │
//! │  └─────────────────────────────────────────────────┼───────────────┘   │
//! │                                                    ▼                    │
//! │                                    stdout  +  SalesResults.txt         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`loader`] - JSON catalogue and ledger readers
//! - [`emitter`] - Report rendering and dual-sink output
//! - [`error`] - Load and emit error types

pub mod emitter;
pub mod error;
pub mod loader;

pub use emitter::{emit, render, ReportContext, DEFAULT_RESULTS_FILE};
pub use error::{EmitError, LoadError};
pub use loader::{load_catalog, load_ledger, CatalogLoad};
