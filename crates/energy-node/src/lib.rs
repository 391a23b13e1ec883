//! # Energy Node
//!
//! Hosts the energy trading contract in a single process. Stands in for the
//! ledger substrate: it owns the ledger, numbers invocations, derives their
//! transaction ids and hands them to the contract handler.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize tracing
//! 3. Restore the ledger snapshot (if `ET_STATE_FILE` is set and exists)
//! 4. Run invocations
//! 5. Persist the snapshot

pub mod config;
pub mod script;
pub mod snapshot;

use std::path::PathBuf;
use std::sync::Arc;

use energy_trading::adapters::{InMemoryLedger, InvocationContext};
use energy_trading::contract::EnergyTradingContract;
use energy_trading::ipc::{ContractHandler, HandlerStats, Response};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::RuntimeConfig;
use crate::script::parse_line;
use crate::snapshot::{LedgerSnapshot, SnapshotError};

/// Node errors.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("tracing initialization failed: {0}")]
    Tracing(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only invocation results.
pub fn init_tracing(config: &RuntimeConfig) -> Result<(), NodeError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| NodeError::Tracing(e.to_string()))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| NodeError::Tracing(e.to_string()))
}

/// The contract together with the ledger it runs against.
pub struct NodeRuntime {
    ledger: Arc<InMemoryLedger>,
    handler: ContractHandler<EnergyTradingContract<InMemoryLedger>>,
    channel: String,
    next_sequence: u64,
    state_file: Option<PathBuf>,
}

impl NodeRuntime {
    /// Open the runtime, restoring the ledger snapshot when one exists.
    pub fn open(config: RuntimeConfig) -> Result<Self, NodeError> {
        let (ledger, next_sequence) = match &config.state_file {
            Some(path) => match LedgerSnapshot::load(path)? {
                Some(snapshot) => {
                    let restored = snapshot.restore()?;
                    info!(path = %path.display(), next_sequence = restored.1, "Ledger snapshot restored");
                    restored
                }
                None => (InMemoryLedger::new(), 0),
            },
            None => (InMemoryLedger::new(), 0),
        };

        let ledger = Arc::new(ledger);
        let contract = EnergyTradingContract::new(Arc::clone(&ledger), config.contract.clone());
        let handler = ContractHandler::new(contract);
        handler.init();

        info!(
            channel = %config.channel,
            single_use_records = config.contract.single_use_records,
            history_mode = %config.contract.history_mode,
            "Energy node ready"
        );

        Ok(Self {
            ledger,
            handler,
            channel: config.channel,
            next_sequence,
            state_file: config.state_file,
        })
    }

    /// Run one invocation stamped with `timestamp`.
    pub fn invoke(&mut self, function: &str, args: &[String], timestamp: &str) -> Response {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let ctx = InvocationContext::derive(&self.channel, sequence, timestamp, function, args);
        debug!(sequence, function, "Invocation received");
        self.handler.invoke(&ctx, function, args)
    }

    /// Run one script line. `None` for blank lines and comments.
    pub fn execute_line(&mut self, line: &str, timestamp: &str) -> Option<Response> {
        let invocation = parse_line(line)?;
        Some(self.invoke(&invocation.function, &invocation.args, timestamp))
    }

    /// Write the ledger snapshot, if a state file is configured.
    pub fn persist(&self) -> Result<(), NodeError> {
        if let Some(path) = &self.state_file {
            LedgerSnapshot::capture(&self.ledger, self.next_sequence)?.save(path)?;
            info!(path = %path.display(), "Ledger snapshot written");
        }
        Ok(())
    }

    pub fn stats(&self) -> HandlerStats {
        self.handler.stats()
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }
}
