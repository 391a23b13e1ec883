//! # Domain Entities
//!
//! The three record kinds that live in the ledger.
//!
//! ## Wire Contract
//!
//! Field names are part of the on-ledger format and are shared with peers
//! running other implementations of this contract:
//!
//! | Record | Fields |
//! |--------|--------|
//! | `EnergyRequest` | `id`, `consumerId`, `energyAmount`, `timestamp` |
//! | `EnergyOffer` | `id`, `producerId`, `energyAmount`, `timestamp` |
//! | `Transaction` | `id`, `requestId`, `offerId`, `energyAmount`, `timestamp`, `status` |
//!
//! Struct field order is the serialization order, so encoding is canonical.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TradingError;

// =============================================================================
// ENERGY AMOUNT
// =============================================================================

/// Quantity of energy carried by a request, offer or transaction.
///
/// Arrives as a base-10 string on the command surface and is stored as a
/// JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyAmount(u64);

impl EnergyAmount {
    /// Wrap a raw amount. Zero is representable so legacy records decode.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse an amount from command input.
    ///
    /// Accepts an optional sign followed by decimal digits. Zero and negative
    /// values are rejected.
    pub fn parse(raw: &str) -> Result<Self, TradingError> {
        let value: i64 = raw
            .parse()
            .map_err(|_| TradingError::Validation("Invalid energy amount".to_string()))?;
        if value <= 0 {
            return Err(TradingError::Validation(format!(
                "Invalid energy amount: must be positive, got {value}"
            )));
        }
        // value > 0 so the cast is lossless
        Ok(Self(value.unsigned_abs()))
    }

    /// Raw value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EnergyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// REQUEST / OFFER
// =============================================================================

/// Energy consumption request posted by a consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRequest {
    pub id: String,
    pub consumer_id: String,
    pub energy_amount: EnergyAmount,
    pub timestamp: String,
}

impl EnergyRequest {
    pub fn new(
        id: impl Into<String>,
        consumer_id: impl Into<String>,
        energy_amount: EnergyAmount,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            consumer_id: consumer_id.into(),
            energy_amount,
            timestamp: timestamp.into(),
        }
    }
}

/// Energy production offer posted by a producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyOffer {
    pub id: String,
    pub producer_id: String,
    pub energy_amount: EnergyAmount,
    pub timestamp: String,
}

impl EnergyOffer {
    pub fn new(
        id: impl Into<String>,
        producer_id: impl Into<String>,
        energy_amount: EnergyAmount,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            producer_id: producer_id.into(),
            energy_amount,
            timestamp: timestamp.into(),
        }
    }
}

// =============================================================================
// TRANSACTION
// =============================================================================

/// Fulfillment status of a matched transaction.
///
/// `Pending` is the state every transaction is created in. Older records
/// carry no status value at all (or an empty string); both decode as
/// `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    #[serde(alias = "")]
    Pending,
    Completed,
}

impl TransactionStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// True once no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matched exchange between one request and one offer.
///
/// Created only by the matching engine, mutated only by the lifecycle,
/// never deleted. `energy_amount` equals both inputs' amounts at match time
/// and is not re-validated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub request_id: String,
    pub offer_id: String,
    pub energy_amount: EnergyAmount,
    pub timestamp: String,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    /// New transaction in its initial `Pending` state.
    pub fn pending(
        id: impl Into<String>,
        request_id: impl Into<String>,
        offer_id: impl Into<String>,
        energy_amount: EnergyAmount,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            request_id: request_id.into(),
            offer_id: offer_id.into(),
            energy_amount,
            timestamp: timestamp.into(),
            status: TransactionStatus::Pending,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}
