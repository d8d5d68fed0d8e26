//! Command line arguments.
//!
//! Exactly two positional paths are accepted: the catalogue, then the ledger.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "\
Usage: compute-sales <priceCatalogue.json> <salesRecord.json>

Options:
  -h, --help    Show this help message

Environment:
  TALLY_RESULTS_FILE   Result file path (default: SalesResults.txt)
  TALLY_LOG            Log filter when RUST_LOG is unset
                       (default: warn,tally=info,compute_sales=info)";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run { catalog: PathBuf, ledger: PathBuf },
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected 2 file paths, got {0}")]
    WrongArgCount(usize),

    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Parses the arguments that follow the program name.
pub fn parse<I, S>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut paths = Vec::new();

    for arg in args.into_iter().map(Into::<String>::into) {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            option if option.starts_with('-') && option.len() > 1 => {
                return Err(UsageError::UnknownOption(option.to_string()));
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    match <[PathBuf; 2]>::try_from(paths) {
        Ok([catalog, ledger]) => Ok(Command::Run { catalog, ledger }),
        Err(paths) => Err(UsageError::WrongArgCount(paths.len())),
    }
}
