//! # Energy Trading - Peer-to-Peer Energy Marketplace Contract
//!
//! Consumers post energy requests, producers post energy offers, and a match
//! between one request and one offer of identical quantity produces a
//! transaction that is later marked completed. Participants query their
//! history by id.
//!
//! All state lives in a shared, replicated key-value ledger reached through
//! the [`ports::LedgerStore`] port. The contract is deterministic: the same
//! invocation against the same ledger snapshot yields the same write set on
//! every replica.
//!
//! ## Domain Rules
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | Amounts are positive integers | `domain/entities.rs` - `EnergyAmount::parse()` |
//! | Identifiers cannot break the key layout | `domain/keys.rs` - `ensure_identifier()` |
//! | Matches require identical quantities | `contract/matching.rs` - `match_pair()` |
//! | A request or offer is consumed once | `contract/matching.rs` - `ensure_unconsumed()` |
//! | History never fails on bad records | `contract/history.rs` - `history_for()` |
//!
//! ## Layout
//!
//! | Layer | Location | Purpose |
//! |-------|----------|---------|
//! | Domain | `domain/` | Records, key layout, codec, errors |
//! | Ports | `ports/` | `EnergyTradingApi`, ledger and oracle traits |
//! | Contract | `contract/` | Registry, matching, lifecycle, history |
//! | IPC | `ipc/` | Command parsing and dispatch |
//! | Adapters | `adapters/` | In-memory ledger, invocation context |
//!
//! ## Usage Example
//!
//! ```
//! use energy_trading::prelude::*;
//! use std::sync::Arc;
//!
//! let contract = EnergyTradingContract::new(
//!     Arc::new(InMemoryLedger::new()),
//!     ContractConfig::default(),
//! );
//! let handler = ContractHandler::new(contract);
//! let ctx = InvocationContext::new("tx-1", "2024-05-01T12:00:00Z");
//!
//! let args = |a: &[&str]| a.iter().map(|s| s.to_string()).collect::<Vec<_>>();
//! handler.invoke(&ctx, "CreateEnergyRequest", &args(&["r1", "c1", "100", "t0"]));
//! handler.invoke(&ctx, "CreateEnergyOffer", &args(&["o1", "p1", "100", "t0"]));
//! let response = handler.invoke(&ctx, "MatchRequestWithOffer", &args(&["r1", "o1"]));
//! assert!(response.is_ok());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod contract;
pub mod domain;
pub mod ipc;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        EnergyAmount, EnergyOffer, EnergyRequest, LedgerKey, RecordKind, StoreError,
        TradingError, Transaction, TransactionStatus,
    };

    // Ports
    pub use crate::ports::{EnergyTradingApi, LedgerStore, SettlementVerifier, TxIdentityOracle};

    // Contract
    pub use crate::config::{ContractConfig, HistoryMode};
    pub use crate::contract::EnergyTradingContract;

    // IPC
    pub use crate::ipc::{Command, ContractHandler, HandlerStats, Response, STATUS_ERROR, STATUS_OK};

    // Adapters
    pub use crate::adapters::{AcceptAllSettlements, InMemoryLedger, InvocationContext};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract name reported by `init`.
pub const CONTRACT_NAME: &str = "energy-trading";
