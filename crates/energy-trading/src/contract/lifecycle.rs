//! Transaction lifecycle: `Pending` → `Completed`.
//!
//! Re-running completion on a completed transaction rewrites the same value.
//! Concurrent completions are not guarded; the substrate orders them.

use tracing::{debug, info};

use super::EnergyTradingContract;
use crate::domain::{ensure_identifier, TradingError, Transaction, TransactionStatus};
use crate::ports::{LedgerStore, SettlementVerifier};

impl<S: LedgerStore, V: SettlementVerifier> EnergyTradingContract<S, V> {
    pub(super) fn complete(&self, transaction_id: &str) -> Result<Transaction, TradingError> {
        ensure_identifier("transactionId", transaction_id)?;

        let mut transaction: Transaction = self.load(transaction_id)?;

        self.verifier.verify(&transaction).map_err(|reason| {
            TradingError::Validation(format!(
                "Settlement verification failed for transaction {transaction_id}: {reason}"
            ))
        })?;

        if transaction.status.is_terminal() {
            debug!(transaction_id = %transaction_id, "Transaction already completed");
        }
        transaction.status = TransactionStatus::Completed;
        self.save(transaction_id, &transaction)?;

        info!(transaction_id = %transaction_id, "Transaction completed");
        Ok(transaction)
    }
}
