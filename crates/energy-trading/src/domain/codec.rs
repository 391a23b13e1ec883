//! # Record Codec
//!
//! Pure JSON encoding of ledger records. No I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::entities::{EnergyOffer, EnergyRequest, Transaction};
use super::errors::TradingError;
use super::keys::RecordKind;

/// A record that can be stored under its own key.
pub trait LedgerRecord: Serialize + DeserializeOwned {
    /// Partition the record lives in.
    const KIND: RecordKind;

    /// Identifier the record is keyed by.
    fn record_id(&self) -> &str;
}

impl LedgerRecord for EnergyRequest {
    const KIND: RecordKind = RecordKind::Request;

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl LedgerRecord for EnergyOffer {
    const KIND: RecordKind = RecordKind::Offer;

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl LedgerRecord for Transaction {
    const KIND: RecordKind = RecordKind::Transaction;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Encode a record as its ledger value.
pub fn encode<R: LedgerRecord>(record: &R) -> Result<Vec<u8>, TradingError> {
    serde_json::to_vec(record).map_err(|e| TradingError::Encode {
        kind: R::KIND,
        reason: e.to_string(),
    })
}

/// Decode a ledger value stored under `id`.
pub fn decode<R: LedgerRecord>(id: &str, bytes: &[u8]) -> Result<R, TradingError> {
    serde_json::from_slice(bytes).map_err(|e| TradingError::Decode {
        kind: R::KIND,
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a history result. An empty history is `[]`.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<Vec<u8>, TradingError> {
    serde_json::to_vec(transactions).map_err(|e| TradingError::Encode {
        kind: RecordKind::Transaction,
        reason: e.to_string(),
    })
}
