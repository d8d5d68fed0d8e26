//! # compute-sales
//!
//! Prices a sales ledger against a product catalogue and writes the report.
//!
//! ## Usage
//! ```bash
//! compute-sales priceCatalogue.json salesRecord.json
//!
//! # Write the report somewhere else
//! TALLY_RESULTS_FILE=out/results.txt compute-sales prices.json sales.json
//!
//! # Verbose logs on stderr
//! RUST_LOG=debug compute-sales prices.json sales.json
//! ```
//!
//! ## Exit Codes
//! - `0` - report written, even if individual rows were skipped
//! - `1` - an input could not be read, or the report could not be written
//! - `2` - bad command line

mod args;
mod config;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tally_core::{aggregate, AggregateReport};
use tally_io::{emit, load_catalog, load_ledger, render, ReportContext};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::args::{Command, USAGE};
use crate::config::CliConfig;

fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::from(1);
        }
    };

    init_tracing(&config.log_filter);

    let command = match args::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Run { catalog, ledger } => {
            match run(&config, &catalog, &ledger, &mut io::stdout().lock()) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %format!("{e:#}"), "Run failed");
                    eprintln!("[ERROR] {e:#}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

/// Loads both inputs, aggregates, and writes the report to `console` and the
/// configured result file.
fn run<W: io::Write>(
    config: &CliConfig,
    catalog_path: &Path,
    ledger_path: &Path,
    console: &mut W,
) -> anyhow::Result<AggregateReport> {
    let catalog = load_catalog(catalog_path).context("loading price catalogue")?;
    let rows = load_ledger(ledger_path).context("loading sales record")?;

    let report = aggregate(&catalog.catalog, &rows);
    info!(
        total = %report.total(),
        rows = report.lines().len(),
        skipped = report.rejected_count(),
        elapsed_s = report.elapsed().as_secs_f64(),
        "Aggregation complete"
    );

    let ctx = ReportContext::new(catalog_path, ledger_path).with_catalog_skipped(catalog.skipped);
    let text = render(&ctx, &report);

    emit(&text, console, &config.results_file).context("writing sales report")?;
    info!(path = %config.results_file.display(), "Report saved");

    Ok(report)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_io=trace` - Show trace for the loader/emitter only
/// - Default: [`CliConfig::log_filter`]
///
/// Logs go to stderr; stdout carries only the report.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tally_core::{Amount, ErrorKind};

    fn config_in(dir: &Path) -> CliConfig {
        CliConfig {
            results_file: dir.join("SalesResults.txt"),
            ..CliConfig::default()
        }
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("prices.json");
        let ledger = dir.path().join("sales.json");
        fs::write(
            &catalog,
            r#"[{"title": "Widget", "price": 10}, {"title": "Gizmo", "price": 2.5}]"#,
        )
        .unwrap();
        fs::write(
            &ledger,
            r#"[
                {"Product": "Widget", "Quantity": 5},
                {"Product": "Gadget", "Quantity": 1},
                {"Product": "Widget", "Quantity": "abc"},
                {"Product": "Gizmo", "Quantity": 4},
                {"Product": "Widget", "Quantity": -2}
            ]"#,
        )
        .unwrap();

        let config = config_in(dir.path());
        let mut console: Vec<u8> = Vec::new();
        let report = run(&config, &catalog, &ledger, &mut console).unwrap();

        assert!(report.total().approx_eq(Amount::new(40.0)));
        let kinds: Vec<ErrorKind> = report.rejected().filter_map(|l| l.error_kind()).collect();
        assert_eq!(kinds, vec![ErrorKind::UnknownProduct, ErrorKind::InvalidQuantity]);

        let written = fs::read(&config.results_file).unwrap();
        assert_eq!(console, written);
        assert!(String::from_utf8(written).unwrap().contains("TOTAL COST: 40.00"));
    }

    #[test]
    fn test_run_lists_skipped_catalogue_entries() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("prices.json");
        let ledger = dir.path().join("sales.json");
        fs::write(
            &catalog,
            r#"[{"title": "Widget", "price": 10}, {"price": 3}, 7, {"title": "Gizmo"}]"#,
        )
        .unwrap();
        fs::write(&ledger, r#"[{"Product": "Widget", "Quantity": 1}]"#).unwrap();

        let config = config_in(dir.path());
        let mut console: Vec<u8> = Vec::new();
        run(&config, &catalog, &ledger, &mut console).unwrap();

        let text = String::from_utf8(console).unwrap();
        assert!(text.contains("Catalogue entries skipped: 2 (positions 2, 3)\n"));
    }

    #[test]
    fn test_run_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("sales.json");
        fs::write(&ledger, "[]").unwrap();

        let config = config_in(dir.path());
        let missing = dir.path().join("missing.json");
        let err = run(&config, &missing, &ledger, &mut Vec::<u8>::new()).unwrap_err();

        assert!(format!("{err:#}").contains("loading price catalogue"));
        assert!(!config.results_file.exists());
    }

    #[test]
    fn test_run_fails_on_non_array_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("prices.json");
        let ledger = dir.path().join("sales.json");
        fs::write(&catalog, "[]").unwrap();
        fs::write(&ledger, r#"{"Product": "Widget"}"#).unwrap();

        let config = config_in(dir.path());
        let err = run(&config, &catalog, &ledger, &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("loading sales record"));
    }
}
