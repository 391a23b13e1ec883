//! # Contract Handler
//!
//! Entry point the ledger substrate calls: parses the invocation, dispatches
//! it to the contract API and wraps the outcome in a `Response`.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, instrument, warn};

use super::commands::Command;
use crate::domain::{codec, TradingError};
use crate::ports::{EnergyTradingApi, TxIdentityOracle};
use crate::CONTRACT_NAME;

/// Status code for a successful invocation.
pub const STATUS_OK: u16 = 200;

/// Status code for a failed invocation.
pub const STATUS_ERROR: u16 = 500;

/// Outcome of one invocation, shaped like the substrate's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Invocation counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HandlerStats {
    /// Total invocations received.
    pub invocations: u64,
    /// Invocations that returned success.
    pub succeeded: u64,
    /// Invocations rejected before touching the ledger.
    pub rejected: u64,
    /// Invocations that failed after reaching the ledger.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    invocations: AtomicU64,
    succeeded: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

/// Dispatches invocations to an `EnergyTradingApi`.
pub struct ContractHandler<A: EnergyTradingApi> {
    api: A,
    counters: Counters,
}

impl<A: EnergyTradingApi> ContractHandler<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            counters: Counters::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Contract instantiation. No state is written.
    pub fn init(&self) -> Response {
        info!(contract = CONTRACT_NAME, version = crate::VERSION, "Contract initialized");
        Response::success(Vec::new())
    }

    /// Handle one invocation.
    #[instrument(skip(self, oracle, args), fields(argc = args.len()))]
    pub fn invoke(&self, oracle: &dyn TxIdentityOracle, function: &str, args: &[String]) -> Response {
        self.counters.invocations.fetch_add(1, Ordering::Relaxed);

        let result = Command::parse(function, args).and_then(|command| {
            debug!(command = command.name(), read_only = command.is_read_only(), "Dispatching");
            self.dispatch(oracle, command)
        });

        match result {
            Ok(payload) => {
                self.counters.succeeded.fetch_add(1, Ordering::Relaxed);
                Response::success(payload)
            }
            Err(e) => {
                if e.is_validation() {
                    self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                }
                warn!(error = %e, "Invocation failed");
                Response::error(e.to_string())
            }
        }
    }

    fn dispatch(
        &self,
        oracle: &dyn TxIdentityOracle,
        command: Command,
    ) -> Result<Vec<u8>, TradingError> {
        match command {
            Command::CreateEnergyRequest {
                id,
                consumer_id,
                energy_amount,
                timestamp,
            } => {
                self.api
                    .create_energy_request(&id, &consumer_id, &energy_amount, &timestamp)?;
                Ok(Vec::new())
            }
            Command::CreateEnergyOffer {
                id,
                producer_id,
                energy_amount,
                timestamp,
            } => {
                self.api
                    .create_energy_offer(&id, &producer_id, &energy_amount, &timestamp)?;
                Ok(Vec::new())
            }
            Command::MatchRequestWithOffer {
                request_id,
                offer_id,
            } => {
                let transaction = self
                    .api
                    .match_request_with_offer(oracle, &request_id, &offer_id)?;
                codec::encode(&transaction)
            }
            Command::ExecuteTransaction { transaction_id } => {
                self.api.execute_transaction(&transaction_id)?;
                Ok(Vec::new())
            }
            Command::GetTransactionHistory { participant_id } => {
                let history = self.api.get_transaction_history(&participant_id)?;
                codec::encode_transactions(&history)
            }
            Command::GetEnergyRequest { id } => codec::encode(&self.api.get_energy_request(&id)?),
            Command::GetEnergyOffer { id } => codec::encode(&self.api.get_energy_offer(&id)?),
            Command::GetTransaction { transaction_id } => {
                codec::encode(&self.api.get_transaction(&transaction_id)?)
            }
        }
    }

    /// Snapshot of the invocation counters.
    pub fn stats(&self) -> HandlerStats {
        HandlerStats {
            invocations: self.counters.invocations.load(Ordering::Relaxed),
            succeeded: self.counters.succeeded.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}
