//! Registry: creates request and offer records.
//!
//! One write per call, no reads. An existing record with the same id is
//! silently overwritten.

use tracing::info;

use super::EnergyTradingContract;
use crate::domain::{ensure_identifier, EnergyAmount, EnergyOffer, EnergyRequest, TradingError};
use crate::ports::{LedgerStore, SettlementVerifier};

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingContract<S, V> {
    pub(super) fn register_request(
        &self,
        id: &str,
        consumer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<EnergyRequest, TradingError> {
        ensure_identifier("id", id)?;
        ensure_identifier("consumerId", consumer_id)?;
        let amount = EnergyAmount::parse(energy_amount)?;

        let request = EnergyRequest::new(id, consumer_id, amount, timestamp);
        self.save(id, &request)?;

        info!(
            request_id = %id,
            consumer_id = %consumer_id,
            energy_amount = amount.value(),
            "Energy request registered"
        );
        Ok(request)
    }

    pub(super) fn register_offer(
        &self,
        id: &str,
        producer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<EnergyOffer, TradingError> {
        ensure_identifier("id", id)?;
        ensure_identifier("producerId", producer_id)?;
        let amount = EnergyAmount::parse(energy_amount)?;

        let offer = EnergyOffer::new(id, producer_id, amount, timestamp);
        self.save(id, &offer)?;

        info!(
            offer_id = %id,
            producer_id = %producer_id,
            energy_amount = amount.value(),
            "Energy offer registered"
        );
        Ok(offer)
    }
}
