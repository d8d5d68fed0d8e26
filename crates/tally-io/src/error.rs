//! # I/O Error Types
//!
//! Errors that end a run. Anything wrong with a single row is NOT an error
//! here; it is recorded in the report by tally-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoadError / EmitError (this module) ← Adds the offending path         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (compute-sales) ← Adds run context                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stderr message, exit code 1                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing, unreadable or not UTF-8.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON.
    #[error("cannot parse JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but the top level is not an array.
    #[error("{path} must contain a JSON array, found {found}")]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// Failures while writing the report.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot write report to console: {0}")]
    Console(#[source] std::io::Error),

    #[error("cannot write report to {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

pub type EmitResult<T> = Result<T, EmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_array_message() {
        let err = LoadError::NotAnArray {
            path: PathBuf::from("sales.json"),
            found: "object",
        };
        assert_eq!(
            err.to_string(),
            "sales.json must contain a JSON array, found object"
        );
    }
}
