//! # IPC Layer
//!
//! Command parsing and dispatch between the ledger substrate and the
//! contract API.

pub mod commands;
pub mod handler;

pub use commands::Command;
pub use handler::{ContractHandler, HandlerStats, Response, STATUS_ERROR, STATUS_OK};
