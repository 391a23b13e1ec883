//! # Energy-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── support.rs        # Shared fixtures and a failing ledger double
//!     ├── trading_flows.rs  # Request → offer → match → execute → history
//!     ├── history.rs        # History over damaged or dangling records
//!     └── node.rs           # Script-driven runs through the energy node
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p energy-tests
//! cargo test -p energy-tests integration::history
//! ```

#![allow(dead_code)]
