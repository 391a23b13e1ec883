//! JSON snapshot of the in-memory ledger.
//!
//! Values are hex encoded so arbitrary bytes survive the round trip. The
//! file is written to a sibling temp file and renamed into place, so a crash
//! mid-write leaves the previous snapshot intact.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use energy_trading::adapters::InMemoryLedger;
use energy_trading::domain::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),

    #[error("malformed value for key {key}: {source}")]
    Value {
        key: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("ledger unavailable: {0}")]
    Ledger(#[from] StoreError),
}

/// Persisted ledger state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Sequence number of the next invocation.
    pub next_sequence: u64,
    /// Ledger entries, values hex encoded.
    pub entries: BTreeMap<String, String>,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &InMemoryLedger, next_sequence: u64) -> Result<Self, SnapshotError> {
        let entries = ledger
            .snapshot()?
            .into_iter()
            .map(|(key, value)| (key, hex::encode(value)))
            .collect();
        Ok(Self {
            next_sequence,
            entries,
        })
    }

    /// Rebuild the ledger this snapshot was captured from.
    pub fn restore(self) -> Result<(InMemoryLedger, u64), SnapshotError> {
        let mut entries = BTreeMap::new();
        for (key, value) in self.entries {
            let bytes = hex::decode(&value).map_err(|source| SnapshotError::Value {
                key: key.clone(),
                source,
            })?;
            entries.insert(key, bytes);
        }
        Ok((InMemoryLedger::from_entries(entries), self.next_sequence))
    }

    /// Load a snapshot. `None` if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        match fs::read(path) {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the snapshot atomically.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let data = serde_json::to_vec_pretty(self)?;
        let tmp_path = path.with_extension("json.tmp");
        let io_err = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::write(&tmp_path, data).map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;
        Ok(())
    }
}
