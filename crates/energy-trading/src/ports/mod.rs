//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `EnergyTradingApi`, consumed by the
//!   command handler
//! - **Driven Ports (Outbound)**: ledger store, identity oracle and
//!   settlement verifier, implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
