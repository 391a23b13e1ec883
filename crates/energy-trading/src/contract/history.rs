//! History reconstructor: read-only query over matched transactions.
//!
//! Results are in key order, which is transaction-id order rather than
//! chronological. A record that cannot be decoded or joined is skipped with
//! a warning; only store failures abort the query.

use tracing::{debug, warn};

use super::EnergyTradingContract;
use crate::config::HistoryMode;
use crate::domain::{
    codec, ensure_identifier, EnergyOffer, EnergyRequest, KeyRange, LedgerKey, LedgerRecord,
    RecordKind, TradingError, Transaction, KEY_SEPARATOR,
};
use crate::ports::{LedgerStore, SettlementVerifier};

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingContract<S, V> {
    pub(super) fn history_for(&self, participant_id: &str) -> Result<Vec<Transaction>, TradingError> {
        ensure_identifier("participantId", participant_id)?;

        let candidates = match self.config.history_mode {
            HistoryMode::Scan => self.scan_transactions()?,
            HistoryMode::Indexed => self.indexed_transactions(participant_id)?,
        };

        let mut history = Vec::new();
        for (tx_id, bytes) in candidates {
            let transaction: Transaction = match codec::decode(&tx_id, &bytes) {
                Ok(tx) => tx,
                Err(e) => {
                    warn!(transaction_id = %tx_id, error = %e, "Skipping undecodable transaction");
                    continue;
                }
            };

            let Some(request) = self.join::<EnergyRequest>(&tx_id, &transaction.request_id)? else {
                continue;
            };
            let Some(offer) = self.join::<EnergyOffer>(&tx_id, &transaction.offer_id)? else {
                continue;
            };

            if request.consumer_id == participant_id || offer.producer_id == participant_id {
                history.push(transaction);
                if self
                    .config
                    .max_history_results
                    .is_some_and(|max| history.len() >= max)
                {
                    debug!(participant_id = %participant_id, "History truncated");
                    break;
                }
            }
        }

        debug!(
            participant_id = %participant_id,
            mode = %self.config.history_mode,
            results = history.len(),
            "History reconstructed"
        );
        Ok(history)
    }

    /// Every record in the transaction partition, keyed by transaction id.
    fn scan_transactions(&self) -> Result<Vec<(String, Vec<u8>)>, TradingError> {
        let range = KeyRange::partition(RecordKind::Transaction);
        let entries = self
            .store
            .range_scan(&range.start, &range.end)
            .map_err(|e| TradingError::store("scan transactions", e))?;

        Ok(entries
            .into_iter()
            .map(|(key, bytes)| (strip_tag(&key).to_string(), bytes))
            .collect())
    }

    /// Transactions referenced by the participant's index entries.
    fn indexed_transactions(
        &self,
        participant_id: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, TradingError> {
        let range = KeyRange::participant_index(participant_id);
        let entries = self
            .store
            .range_scan(&range.start, &range.end)
            .map_err(|e| TradingError::store("scan history index", e))?;

        let mut candidates = Vec::with_capacity(entries.len());
        for (index_key, _) in entries {
            let tx_id = strip_tag(strip_tag(&index_key)).to_string();
            let key = LedgerKey::record(RecordKind::Transaction, &tx_id);
            match self.read_key(&key, "transaction")? {
                Some(bytes) => candidates.push((tx_id, bytes)),
                None => {
                    warn!(index_key = %index_key, "Skipping dangling history index entry");
                }
            }
        }
        Ok(candidates)
    }

    /// Referenced request or offer of a transaction, `None` if it cannot be used.
    fn join<R: LedgerRecord>(&self, tx_id: &str, id: &str) -> Result<Option<R>, TradingError> {
        let Some(bytes) = self.read_key(&LedgerKey::record(R::KIND, id), "record")? else {
            warn!(
                transaction_id = %tx_id,
                missing = %LedgerKey::record(R::KIND, id),
                "Skipping transaction with missing counterpart"
            );
            return Ok(None);
        };
        match codec::decode::<R>(id, &bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(transaction_id = %tx_id, error = %e, "Skipping transaction with undecodable counterpart");
                Ok(None)
            }
        }
    }
}

/// Drop the leading key segment.
fn strip_tag(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR).map_or(key, |(_, rest)| rest)
}
