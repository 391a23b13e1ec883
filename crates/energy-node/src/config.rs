//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;

use energy_trading::config::{parse_bool, ConfigError, ContractConfig};

/// Configuration for the energy node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Contract behavior switches.
    pub contract: ContractConfig,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Ledger snapshot loaded at startup and written at shutdown
    pub state_file: Option<PathBuf>,

    /// Channel name mixed into derived transaction ids
    pub channel: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            contract: ContractConfig::default(),
            log_level: "info".to_string(),
            json_logs: false,
            state_file: None,
            channel: "energy-channel".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ET_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `ET_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `ET_STATE_FILE`: Snapshot path (default: none, ledger is discarded)
    /// - `ET_CHANNEL`: Channel name (default: energy-channel)
    /// - plus the contract variables read by `ContractConfig::from_env`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            contract: ContractConfig::from_env()?,

            log_level: env::var("ET_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: match env::var("ET_JSON_LOGS") {
                Ok(v) => parse_bool("ET_JSON_LOGS", &v)?,
                Err(_) => defaults.json_logs,
            },

            state_file: env::var_os("ET_STATE_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),

            channel: env::var("ET_CHANNEL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.channel),
        })
    }
}
