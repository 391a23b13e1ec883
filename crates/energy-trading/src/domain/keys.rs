//! # Ledger Key Layout
//!
//! All records share one key-value namespace. Keys are tagged with the
//! record kind so identifiers cannot collide across kinds and each kind
//! occupies its own lexicographic partition.
//!
//! ```text
//! REQ~<requestId>                    EnergyRequest
//! OFF~<offerId>                      EnergyOffer
//! TXN~<transactionId>                Transaction
//! IDX~<participantId>~<txId>         participant -> transaction index
//! USE~<REQ|OFF>~<id>                 consumption marker -> transaction id
//! ```

use std::fmt;

use super::errors::TradingError;

/// Separator between key segments. Identifiers may not contain it.
pub const KEY_SEPARATOR: char = '~';

/// First character after `KEY_SEPARATOR`; upper bound of a prefix range.
const PREFIX_END: char = '\u{7f}';

const INDEX_TAG: &str = "IDX";
const CONSUMED_TAG: &str = "USE";

/// Kind of record stored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Request,
    Offer,
    Transaction,
}

impl RecordKind {
    /// Key tag for this kind's partition.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Request => "REQ",
            Self::Offer => "OFF",
            Self::Transaction => "TXN",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Request => "Energy request",
            Self::Offer => "Energy offer",
            Self::Transaction => "Transaction",
        })
    }
}

/// A fully composed ledger key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerKey(String);

impl LedgerKey {
    /// Key of a record of `kind` with identifier `id`.
    #[must_use]
    pub fn record(kind: RecordKind, id: &str) -> Self {
        Self(format!("{}{KEY_SEPARATOR}{id}", kind.tag()))
    }

    /// Index entry linking `participant_id` to `transaction_id`.
    #[must_use]
    pub fn participant_index(participant_id: &str, transaction_id: &str) -> Self {
        Self(format!(
            "{INDEX_TAG}{KEY_SEPARATOR}{participant_id}{KEY_SEPARATOR}{transaction_id}"
        ))
    }

    /// Marker recording that a request or offer was consumed by a match.
    #[must_use]
    pub fn consumed(kind: RecordKind, id: &str) -> Self {
        Self(format!(
            "{CONSUMED_TAG}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{id}",
            kind.tag()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open `[start, end)` key range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: String,
    pub end: String,
}

impl KeyRange {
    /// Every key beginning with `prefix` followed by the separator.
    fn under(prefix: &str) -> Self {
        Self {
            start: format!("{prefix}{KEY_SEPARATOR}"),
            end: format!("{prefix}{PREFIX_END}"),
        }
    }

    /// Whole partition of one record kind.
    #[must_use]
    pub fn partition(kind: RecordKind) -> Self {
        Self::under(kind.tag())
    }

    /// All index entries of one participant.
    #[must_use]
    pub fn participant_index(participant_id: &str) -> Self {
        Self::under(&format!("{INDEX_TAG}{KEY_SEPARATOR}{participant_id}"))
    }
}

/// Reject identifiers that would break the key layout.
pub fn ensure_identifier(field: &str, value: &str) -> Result<(), TradingError> {
    if value.is_empty() {
        return Err(TradingError::Validation(format!("{field} must not be empty")));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(TradingError::Validation(format!(
            "{field} must not contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}
