//! # Invocation Context
//!
//! Identity oracle for hosts that drive the contract directly (the node
//! runtime, tests). The transaction id is either given or derived by hashing
//! everything that identifies the invocation, so replaying the same
//! invocation on another replica yields the same id.

use sha2::{Digest, Sha256};

use crate::domain::StoreError;
use crate::ports::TxIdentityOracle;

/// Fixed transaction id and timestamp for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    tx_id: String,
    timestamp: String,
}

impl InvocationContext {
    pub fn new(tx_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Derive the id as hex SHA-256 over channel, sequence number,
    /// timestamp, function name and arguments.
    ///
    /// Fields are length-prefixed so `("ab", "c")` and `("a", "bc")` hash
    /// differently.
    pub fn derive(
        channel: &str,
        sequence: u64,
        timestamp: impl Into<String>,
        function: &str,
        args: &[String],
    ) -> Self {
        let timestamp = timestamp.into();
        let mut hasher = Sha256::new();
        let mut absorb = |field: &[u8]| {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        };
        absorb(channel.as_bytes());
        absorb(&sequence.to_be_bytes());
        absorb(timestamp.as_bytes());
        absorb(function.as_bytes());
        for arg in args {
            absorb(arg.as_bytes());
        }

        Self {
            tx_id: hex::encode(hasher.finalize()),
            timestamp,
        }
    }
}

impl TxIdentityOracle for InvocationContext {
    fn tx_id(&self) -> String {
        self.tx_id.clone()
    }

    fn tx_timestamp(&self) -> Result<String, StoreError> {
        Ok(self.timestamp.clone())
    }
}
