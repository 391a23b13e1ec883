//! # Error Types
//!
//! `TradingError` is what every contract operation returns. Its `Display`
//! output is the message handed back to the caller, so variants keep the
//! wording peers already expect.

use thiserror::Error;

use super::keys::RecordKind;

// =============================================================================
// TRADING ERRORS
// =============================================================================

/// Errors raised by contract operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TradingError {
    /// Malformed invocation: argument count, amount, identifier, or a
    /// refused settlement check.
    #[error("{0}")]
    Validation(String),

    /// Referenced record is absent.
    #[error("{kind} {id} does not exist")]
    NotFound { kind: RecordKind, id: String },

    /// Stored bytes do not match the expected record shape.
    #[error("Failed to unmarshal {kind} {id}: {reason}")]
    Decode {
        kind: RecordKind,
        id: String,
        reason: String,
    },

    /// Record could not be serialized.
    #[error("Failed to marshal {kind}: {reason}")]
    Encode { kind: RecordKind, reason: String },

    /// Request and offer quantities differ.
    #[error(
        "Energy amounts do not match between request and offer: request {request}, offer {offer}"
    )]
    Mismatch { request: u64, offer: u64 },

    /// Request or offer was already consumed by an earlier match.
    #[error("{kind} {id} already matched by transaction {transaction_id}")]
    Conflict {
        kind: RecordKind,
        id: String,
        transaction_id: String,
    },

    /// Ledger substrate failure, reported verbatim.
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: String,
        #[source]
        source: StoreError,
    },
}

impl TradingError {
    pub(crate) fn store(operation: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            operation: operation.into(),
            source,
        }
    }

    /// True when the invocation was rejected before touching the ledger.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors surfaced by the ledger substrate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("ledger state lock poisoned")]
    LockPoisoned,

    #[error("ledger backend unavailable")]
    Unavailable,

    #[error("ledger backend error: {0}")]
    Backend(String),
}
