//! # Contract Configuration
//!
//! Behavior switches for the matching engine and history reconstructor.
//! Every replica of a channel must run with the same values, otherwise
//! their write sets diverge.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How `GetTransactionHistory` finds candidate transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryMode {
    /// Range scan over the whole transaction partition.
    #[default]
    Scan,
    /// Prefix scan of the participant index written at match time.
    ///
    /// The index records who the consumer and producer were when the match
    /// happened. Re-registering a request or offer under another participant
    /// afterwards is not reflected, and transactions matched while the index
    /// was off have no entries.
    Indexed,
}

impl FromStr for HistoryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "indexed" | "index" => Ok(Self::Indexed),
            _ => Err(ConfigError::InvalidValue {
                var: "ET_HISTORY_MODE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scan => "scan",
            Self::Indexed => "indexed",
        })
    }
}

/// Contract configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Refuse to match a request or offer that an earlier match consumed.
    pub single_use_records: bool,
    /// Candidate lookup strategy for history queries.
    pub history_mode: HistoryMode,
    /// Truncate history results after this many entries.
    pub max_history_results: Option<usize>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            single_use_records: false,
            history_mode: HistoryMode::Scan,
            max_history_results: None,
        }
    }
}

impl ContractConfig {
    /// Single-use guard on, history served from the participant index.
    #[must_use]
    pub fn guarded() -> Self {
        Self {
            single_use_records: true,
            history_mode: HistoryMode::Indexed,
            max_history_results: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ET_SINGLE_USE_RECORDS`: `true`/`false` (default: false)
    /// - `ET_HISTORY_MODE`: `scan` or `indexed` (default: scan)
    /// - `ET_MAX_HISTORY_RESULTS`: positive integer (default: unbounded)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = env::var("ET_SINGLE_USE_RECORDS") {
            config.single_use_records = parse_bool("ET_SINGLE_USE_RECORDS", &v)?;
        }
        if let Ok(v) = env::var("ET_HISTORY_MODE") {
            config.history_mode = v.parse()?;
        }
        if let Ok(v) = env::var("ET_MAX_HISTORY_RESULTS") {
            let max = v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "ET_MAX_HISTORY_RESULTS",
                    value: v.clone(),
                })?;
            config.max_history_results = Some(max);
        }

        Ok(config)
    }
}

/// Parse a boolean environment value.
pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
