//! Shared fixtures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use energy_trading::prelude::*;

/// Timestamp stamped on every invocation the harness makes.
pub const INVOCATION_TS: &str = "2024-05-01T12:00:00Z";

/// Contract handler driven the way the ledger substrate drives it.
pub struct Harness<S: LedgerStore> {
    pub ledger: Arc<S>,
    pub handler: ContractHandler<EnergyTradingContract<S>>,
}

impl Harness<InMemoryLedger> {
    pub fn new(config: ContractConfig) -> Self {
        Self::with_ledger(Arc::new(InMemoryLedger::new()), config)
    }
}

impl<S: LedgerStore> Harness<S> {
    pub fn with_ledger(ledger: Arc<S>, config: ContractConfig) -> Self {
        let handler = ContractHandler::new(EnergyTradingContract::new(Arc::clone(&ledger), config));
        Self { ledger, handler }
    }

    /// Invoke `function` as transaction `tx_id`.
    pub fn call(&self, tx_id: &str, function: &str, args: &[&str]) -> Response {
        let ctx = InvocationContext::new(tx_id, INVOCATION_TS);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.handler.invoke(&ctx, function, &args)
    }

    /// Invoke and fail the test unless it succeeded.
    pub fn ok(&self, tx_id: &str, function: &str, args: &[&str]) -> Vec<u8> {
        let response = self.call(tx_id, function, args);
        assert!(
            response.is_ok(),
            "{function} {args:?} failed: {}",
            response.message
        );
        response.payload
    }

    pub fn request(&self, id: &str, consumer: &str, amount: &str) {
        self.ok("setup", "CreateEnergyRequest", &[id, consumer, amount, "2024-05-01T10:00:00Z"]);
    }

    pub fn offer(&self, id: &str, producer: &str, amount: &str) {
        self.ok("setup", "CreateEnergyOffer", &[id, producer, amount, "2024-05-01T10:05:00Z"]);
    }

    pub fn matched(&self, tx_id: &str, request_id: &str, offer_id: &str) -> Transaction {
        let payload = self.ok(tx_id, "MatchRequestWithOffer", &[request_id, offer_id]);
        decode_transaction(&payload)
    }

    pub fn history(&self, participant_id: &str) -> Vec<Transaction> {
        let payload = self.ok("query", "GetTransactionHistory", &[participant_id]);
        serde_json::from_slice(&payload).expect("history payload is a JSON array")
    }

    pub fn history_ids(&self, participant_id: &str) -> Vec<String> {
        self.history(participant_id).into_iter().map(|tx| tx.id).collect()
    }

    /// Overwrite a raw ledger value.
    pub fn corrupt(&self, key: &LedgerKey, bytes: &[u8]) {
        self.ledger
            .put_state(key.as_str(), bytes.to_vec())
            .expect("ledger write");
    }
}

pub fn decode_transaction(payload: &[u8]) -> Transaction {
    serde_json::from_slice(payload).expect("payload is a transaction")
}

/// Ledger that can be switched to refuse reads or writes.
#[derive(Default)]
pub struct FlakyLedger {
    inner: InMemoryLedger,
    reads_down: AtomicBool,
    writes_down: AtomicBool,
}

impl FlakyLedger {
    pub fn fail_reads(&self, down: bool) {
        self.reads_down.store(down, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, down: bool) {
        self.writes_down.store(down, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.len().expect("ledger lock")
    }
}

impl LedgerStore for FlakyLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.reads_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.writes_down.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("peer endorsement failed".to_string()));
        }
        self.inner.put_state(key, value)
    }

    fn batch_put(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), StoreError> {
        if self.writes_down.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("peer endorsement failed".to_string()));
        }
        self.inner.batch_put(entries)
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        if self.reads_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.inner.range_scan(start, end)
    }
}
