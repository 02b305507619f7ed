//! Snapshot persistence for in-memory ledgers
//!
//! Captures metadata, configuration, and every storage entry so a ledger
//! backed by `MemoryStorage` survives process restarts.
//!
//! Features:
//! - `BTreeMap` entries for deterministic serialization
//! - SHA-256 integrity hash over the canonical JSON body
//! - Snapshot versioning
//! - Atomic file writes (temp file + rename)
//! - Supply-cap verification on restore

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use types::numeric::Amount;

use crate::config::LedgerConfig;
use crate::errors::SnapshotError;
use crate::ledger::{Ledger, LedgerMeta};
use crate::storage::MemoryStorage;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable image of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub meta: LedgerMeta,
    pub config: LedgerConfig,
    pub entries: BTreeMap<String, Amount>,
    /// Hex SHA-256 of the other fields.
    pub checksum: String,
}

/// The checksummed body, borrowed so hashing never clones entries.
#[derive(Serialize)]
struct SnapshotBody<'a> {
    version: u32,
    meta: &'a LedgerMeta,
    config: &'a LedgerConfig,
    entries: &'a BTreeMap<String, Amount>,
}

fn compute_checksum(
    version: u32,
    meta: &LedgerMeta,
    config: &LedgerConfig,
    entries: &BTreeMap<String, Amount>,
) -> Result<String, SnapshotError> {
    let bytes = serde_json::to_vec(&SnapshotBody {
        version,
        meta,
        config,
        entries,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

impl LedgerSnapshot {
    /// Capture the current state of a ledger.
    pub fn capture(ledger: &Ledger<MemoryStorage>) -> Result<Self, SnapshotError> {
        let meta = ledger.meta().clone();
        let config = ledger.config().clone();
        let entries = ledger.storage().entries().clone();
        let checksum = compute_checksum(SNAPSHOT_VERSION, &meta, &config, &entries)?;

        debug!(entries = entries.len(), %checksum, "Ledger snapshot captured");
        Ok(Self {
            version: SNAPSHOT_VERSION,
            meta,
            config,
            entries,
            checksum,
        })
    }

    /// Recompute the checksum and compare it with the stored one.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        let actual = compute_checksum(self.version, &self.meta, &self.config, &self.entries)?;
        if actual != self.checksum {
            warn!(expected = %self.checksum, %actual, "Snapshot integrity check failed");
            return Err(SnapshotError::IntegrityFailure {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Rebuild the ledger described by this snapshot.
    pub fn restore(self) -> Result<Ledger<MemoryStorage>, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        self.verify()?;

        let enforce = self.config.enforce_supply_cap;
        let storage = MemoryStorage::from_entries(self.entries, Some(self.meta));
        let ledger = Ledger::with_config(storage, self.config);
        if enforce {
            ledger.check_supply_invariant()?;
        }

        info!(
            symbol = ledger.symbol(),
            holders = ledger.holders().len(),
            "Ledger restored from snapshot"
        );
        Ok(ledger)
    }

    /// Write the snapshot as JSON. The file is replaced atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;

        debug!(path = %path.display(), "Ledger snapshot saved");
        Ok(())
    }

    /// Read and verify a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path.as_ref())?;
        let snapshot: Self = serde_json::from_slice(&bytes)?;
        snapshot.verify()?;
        Ok(snapshot)
    }
}
