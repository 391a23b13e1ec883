//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the contract depends on. The ledger substrate implements the
//! store and the identity oracle; settlement verification is a hook for an
//! external delivery/payment check.

use crate::domain::{StoreError, Transaction};

// =============================================================================
// LEDGER STORE
// =============================================================================

/// Deterministic key-value view of the ledger for one invocation.
///
/// Reads observe a consistent snapshot; writes become visible when the
/// substrate commits the invocation. Ordering and conflict detection across
/// invocations belong to the substrate.
pub trait LedgerStore: Send + Sync {
    /// Point read. `None` if the key was never written.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Point write. Last write wins.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Apply several writes as one unit: either every entry is written or,
    /// on error, none is.
    fn batch_put(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), StoreError>;

    /// Lexicographic scan of `[start, end)`.
    ///
    /// An empty `end` scans to the end of the key space. Results are sorted
    /// by key.
    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError>;
}

// =============================================================================
// TRANSACTION IDENTITY ORACLE
// =============================================================================

/// Source of the invocation's transaction id and timestamp.
///
/// Both values are fixed for the duration of one invocation and identical on
/// every replica executing it.
pub trait TxIdentityOracle {
    /// Unique id of the current invocation.
    fn tx_id(&self) -> String;

    /// Timestamp assigned to the current invocation.
    fn tx_timestamp(&self) -> Result<String, StoreError>;
}

// =============================================================================
// SETTLEMENT VERIFIER
// =============================================================================

/// Check run before a transaction is marked completed.
pub trait SettlementVerifier: Send + Sync {
    /// `Err(reason)` refuses completion.
    fn verify(&self, transaction: &Transaction) -> Result<(), String>;
}
