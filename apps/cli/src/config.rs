//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable             | Default                  | Meaning                             |
//! |----------------------|--------------------------|-------------------------------------|
//! | `TALLY_RESULTS_FILE` | `SalesResults.txt`       | Where the report is written         |
//! | `TALLY_LOG`          | [`DEFAULT_LOG_FILTER`]   | Log filter when `RUST_LOG` is unset |

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use tally_io::DEFAULT_RESULTS_FILE;

/// Default `tracing` filter directive.
///
/// `tally` matches both library crates (`tally_core`, `tally_io`);
/// `compute_sales` is this binary's own target.
pub const DEFAULT_LOG_FILTER: &str = "warn,tally=info,compute_sales=info";

/// compute-sales configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Result file the report is written to (in addition to stdout)
    pub results_file: PathBuf,

    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let results_file = match lookup("TALLY_RESULTS_FILE") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("TALLY_RESULTS_FILE".to_string()))
            }
            Some(value) => PathBuf::from(value),
            None => defaults.results_file,
        };

        let log_filter = match lookup("TALLY_LOG") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("TALLY_LOG".to_string()))
            }
            Some(value) => value,
            None => defaults.log_filter,
        };

        Ok(CliConfig {
            results_file,
            log_filter,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.results_file, PathBuf::from("SalesResults.txt"));
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("TALLY_RESULTS_FILE", "out/report.txt"),
            ("TALLY_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.results_file, PathBuf::from("out/report.txt"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_blank_values_are_rejected() {
        let err = CliConfig::from_lookup(lookup_from(&[("TALLY_RESULTS_FILE", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "TALLY_RESULTS_FILE"));

        assert!(CliConfig::from_lookup(lookup_from(&[("TALLY_LOG", "")])).is_err());
    }

    #[test]
    fn test_default_filter_covers_binary_target() {
        let directives: Vec<&str> = DEFAULT_LOG_FILTER.split(',').collect();
        let binary_target = module_path!().split("::").next().unwrap();

        assert_eq!(binary_target, "compute_sales");
        assert!(directives.contains(&"compute_sales=info"));
        assert!(directives.contains(&"tally=info"));
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
