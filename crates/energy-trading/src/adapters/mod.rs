//! # Adapters Layer
//!
//! Implementations of the outbound ports for hosts that run the contract
//! in-process. A ledger peer provides its own store and oracle.

pub mod invocation;
pub mod memory_ledger;
pub mod settlement;

pub use invocation::*;
pub use memory_ledger::*;
pub use settlement::*;
