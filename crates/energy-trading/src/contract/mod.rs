//! # Energy Trading Contract
//!
//! The contract is a set of synchronous state transitions over the ledger
//! store. It keeps no state of its own between invocations: everything it
//! knows is read from the store, and everything it decides is written back.
//!
//! ## Components
//!
//! | Component | Location | Writes |
//! |-----------|----------|--------|
//! | Registry | `registry.rs` | `REQ~`, `OFF~` |
//! | Matching Engine | `matching.rs` | `TXN~`, `USE~`, `IDX~` (one batch) |
//! | Transaction Lifecycle | `lifecycle.rs` | `TXN~` |
//! | History Reconstructor | `history.rs` | nothing |
//!
//! Components never call each other; they coordinate through keys.

mod history;
mod lifecycle;
mod matching;
mod registry;

use std::sync::Arc;

use crate::adapters::AcceptAllSettlements;
use crate::config::ContractConfig;
use crate::domain::{
    codec, EnergyOffer, EnergyRequest, LedgerKey, LedgerRecord, RecordKind, TradingError,
    Transaction,
};
use crate::ports::{EnergyTradingApi, LedgerStore, SettlementVerifier, TxIdentityOracle};

/// The energy trading contract bound to a ledger store.
pub struct EnergyTradingContract<S: LedgerStore, V: SettlementVerifier = AcceptAllSettlements> {
    store: Arc<S>,
    verifier: V,
    config: ContractConfig,
}

impl<S: LedgerStore> EnergyTradingContract<S> {
    /// Contract with the accept-all settlement check.
    pub fn new(store: Arc<S>, config: ContractConfig) -> Self {
        Self::with_verifier(store, AcceptAllSettlements, config)
    }
}

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingContract<S, V> {
    pub fn with_verifier(store: Arc<S>, verifier: V, config: ContractConfig) -> Self {
        Self {
            store,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ───────────────────────── Ledger helpers ─────────────────────────

    fn read_key(&self, key: &LedgerKey, what: &str) -> Result<Option<Vec<u8>>, TradingError> {
        self.store
            .get_state(key.as_str())
            .map_err(|e| TradingError::store(format!("read {what} from world state"), e))
    }

    fn write_key(&self, key: &LedgerKey, value: Vec<u8>, what: &str) -> Result<(), TradingError> {
        self.store
            .put_state(key.as_str(), value)
            .map_err(|e| TradingError::store(format!("put {what} in state"), e))
    }

    /// Write every entry or none.
    fn write_batch(
        &self,
        writes: Vec<(LedgerKey, Vec<u8>)>,
        what: &str,
    ) -> Result<(), TradingError> {
        let entries = writes
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();
        self.store
            .batch_put(entries)
            .map_err(|e| TradingError::store(format!("put {what} in state"), e))
    }

    /// Raw bytes of a record, `NotFound` if absent.
    fn read_existing<R: LedgerRecord>(&self, id: &str) -> Result<Vec<u8>, TradingError> {
        let key = LedgerKey::record(R::KIND, id);
        self.read_key(&key, &describe(R::KIND))?
            .ok_or_else(|| TradingError::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            })
    }

    /// Read and decode a record, `NotFound` if absent, `Decode` if malformed.
    fn load<R: LedgerRecord>(&self, id: &str) -> Result<R, TradingError> {
        let bytes = self.read_existing::<R>(id)?;
        codec::decode(id, &bytes)
    }

    /// Encode `record` and store it under `id` in its partition.
    fn save<R: LedgerRecord>(&self, id: &str, record: &R) -> Result<(), TradingError> {
        let bytes = codec::encode(record)?;
        self.write_key(&LedgerKey::record(R::KIND, id), bytes, &describe(R::KIND))
    }
}

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingApi for EnergyTradingContract<S, V> {
    fn create_energy_request(
        &self,
        id: &str,
        consumer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<(), TradingError> {
        self.register_request(id, consumer_id, energy_amount, timestamp)
            .map(|_| ())
    }

    fn create_energy_offer(
        &self,
        id: &str,
        producer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<(), TradingError> {
        self.register_offer(id, producer_id, energy_amount, timestamp)
            .map(|_| ())
    }

    fn get_energy_request(&self, id: &str) -> Result<EnergyRequest, TradingError> {
        self.load(id)
    }

    fn get_energy_offer(&self, id: &str) -> Result<EnergyOffer, TradingError> {
        self.load(id)
    }

    fn match_request_with_offer(
        &self,
        oracle: &dyn TxIdentityOracle,
        request_id: &str,
        offer_id: &str,
    ) -> Result<Transaction, TradingError> {
        self.match_pair(oracle, request_id, offer_id)
    }

    fn execute_transaction(&self, transaction_id: &str) -> Result<Transaction, TradingError> {
        self.complete(transaction_id)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, TradingError> {
        self.load(transaction_id)
    }

    fn get_transaction_history(
        &self,
        participant_id: &str,
    ) -> Result<Vec<Transaction>, TradingError> {
        self.history_for(participant_id)
    }
}

/// Kind-specific wording for log lines and store errors.
fn describe(kind: RecordKind) -> String {
    kind.to_string().to_lowercase()
}
