//! # Driving Ports (API - Inbound)
//!
//! Operations the contract exposes to the command dispatcher.

use crate::domain::{EnergyOffer, EnergyRequest, Transaction, TradingError};
use crate::ports::outbound::TxIdentityOracle;

/// Primary API of the energy trading contract.
///
/// Every method is one deterministic unit of work against the ledger.
pub trait EnergyTradingApi {
    /// Register a consumption request. Overwrites an existing request with
    /// the same id.
    fn create_energy_request(
        &self,
        id: &str,
        consumer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<(), TradingError>;

    /// Register a production offer. Overwrites an existing offer with the
    /// same id.
    fn create_energy_offer(
        &self,
        id: &str,
        producer_id: &str,
        energy_amount: &str,
        timestamp: &str,
    ) -> Result<(), TradingError>;

    fn get_energy_request(&self, id: &str) -> Result<EnergyRequest, TradingError>;

    fn get_energy_offer(&self, id: &str) -> Result<EnergyOffer, TradingError>;

    /// Pair a request with an offer of identical quantity.
    ///
    /// ## Returns
    ///
    /// - `Ok(Transaction)`: the stored transaction, status `Pending`
    /// - `Err(NotFound)`: either input is absent
    /// - `Err(Mismatch)`: quantities differ
    /// - `Err(Conflict)`: an input was already consumed (single-use guard)
    fn match_request_with_offer(
        &self,
        oracle: &dyn TxIdentityOracle,
        request_id: &str,
        offer_id: &str,
    ) -> Result<Transaction, TradingError>;

    /// Mark a transaction completed. Returns the updated record.
    fn execute_transaction(&self, transaction_id: &str) -> Result<Transaction, TradingError>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, TradingError>;

    /// Transactions where the participant is the consumer or the producer,
    /// in key order. Undecodable or dangling records are skipped.
    fn get_transaction_history(
        &self,
        participant_id: &str,
    ) -> Result<Vec<Transaction>, TradingError>;
}
