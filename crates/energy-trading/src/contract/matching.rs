//! Matching engine: pairs one request with one offer of identical quantity.
//!
//! ## Write Set
//!
//! - `TXN~<txId>`: the new transaction, status `Pending`
//! - `USE~REQ~<requestId>`, `USE~OFF~<offerId>`: consumption markers
//!   (single-use guard only)
//! - `IDX~<participant>~<txId>`: history index entries (indexed mode only)
//!
//! The write set goes to the store as one batch, so a failed match leaves
//! no transaction without its markers or index entries.
//!
//! The request and offer records themselves are never modified. Without the
//! single-use guard the same pair can be matched any number of times.
//! Two concurrent matches of the same pair both read the markers as absent;
//! rejecting one of them is left to the substrate's read-set validation.

use tracing::{debug, info, warn};

use super::EnergyTradingContract;
use crate::config::HistoryMode;
use crate::domain::{
    codec, ensure_identifier, EnergyOffer, EnergyRequest, LedgerKey, RecordKind, TradingError,
    Transaction,
};
use crate::ports::{LedgerStore, SettlementVerifier, TxIdentityOracle};

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingContract<S, V> {
    pub(super) fn match_pair(
        &self,
        oracle: &dyn TxIdentityOracle,
        request_id: &str,
        offer_id: &str,
    ) -> Result<Transaction, TradingError> {
        ensure_identifier("requestId", request_id)?;
        ensure_identifier("offerId", offer_id)?;

        // Both must exist before either is decoded.
        let request_bytes = self.read_existing::<EnergyRequest>(request_id)?;
        let offer_bytes = self.read_existing::<EnergyOffer>(offer_id)?;
        let request: EnergyRequest = codec::decode(request_id, &request_bytes)?;
        let offer: EnergyOffer = codec::decode(offer_id, &offer_bytes)?;

        if request.energy_amount != offer.energy_amount {
            debug!(
                request_id = %request_id,
                offer_id = %offer_id,
                request_amount = request.energy_amount.value(),
                offer_amount = offer.energy_amount.value(),
                "Match rejected: quantities differ"
            );
            return Err(TradingError::Mismatch {
                request: request.energy_amount.value(),
                offer: offer.energy_amount.value(),
            });
        }

        if self.config.single_use_records {
            self.ensure_unconsumed(RecordKind::Request, request_id)?;
            self.ensure_unconsumed(RecordKind::Offer, offer_id)?;
        }

        let tx_id = oracle.tx_id();
        ensure_identifier("transaction id", &tx_id)?;
        let timestamp = oracle
            .tx_timestamp()
            .map_err(|e| TradingError::store("get transaction timestamp", e))?;

        let transaction = Transaction::pending(
            tx_id.as_str(),
            request_id,
            offer_id,
            request.energy_amount,
            timestamp,
        );
        let mut writes = vec![(
            LedgerKey::record(RecordKind::Transaction, &tx_id),
            codec::encode(&transaction)?,
        )];

        if self.config.single_use_records {
            writes.push((LedgerKey::consumed(RecordKind::Request, request_id), tx_id.clone().into_bytes()));
            writes.push((LedgerKey::consumed(RecordKind::Offer, offer_id), tx_id.clone().into_bytes()));
        }

        if self.config.history_mode == HistoryMode::Indexed {
            writes.push((
                LedgerKey::participant_index(&request.consumer_id, &tx_id),
                tx_id.clone().into_bytes(),
            ));
            if offer.producer_id != request.consumer_id {
                writes.push((
                    LedgerKey::participant_index(&offer.producer_id, &tx_id),
                    tx_id.clone().into_bytes(),
                ));
            }
        }

        self.write_batch(writes, "transaction")?;

        info!(
            transaction_id = %tx_id,
            request_id = %request_id,
            offer_id = %offer_id,
            energy_amount = transaction.energy_amount.value(),
            "Request matched with offer"
        );
        Ok(transaction)
    }

    fn ensure_unconsumed(&self, kind: RecordKind, id: &str) -> Result<(), TradingError> {
        let marker = LedgerKey::consumed(kind, id);
        if let Some(bytes) = self.read_key(&marker, "consumption marker")? {
            let transaction_id = String::from_utf8_lossy(&bytes).into_owned();
            warn!(
                record = %marker,
                transaction_id = %transaction_id,
                "Match rejected: record already consumed"
            );
            return Err(TradingError::Conflict {
                kind,
                id: id.to_string(),
                transaction_id,
            });
        }
        Ok(())
    }
}
