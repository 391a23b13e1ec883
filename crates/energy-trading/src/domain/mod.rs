//! # Domain Layer
//!
//! Records, key layout, codec and errors. No I/O; everything touching the
//! ledger goes through the ports in `crate::ports`.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod keys;

pub use codec::*;
pub use entities::*;
pub use errors::*;
pub use keys::*;
