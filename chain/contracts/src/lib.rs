//! Fungible-token ledger contract
//!
//! This crate implements the accounting core of a fungible token: an
//! account-balance store, an approval/allowance store, and the operations
//! that mutate them under conservation and authorization rules. The host
//! runtime supplies the caller identity and the storage backend.
//!
//! # Modules
//! - `config`: Deployment-time behavioral switches
//! - `context`: Caller identity supplied by the host
//! - `errors`: Contract-specific error types
//! - `storage`: Key-value storage capability and in-memory backend
//! - `ledger`: Token metadata, balances, transfers, and allowances
//! - `snapshot`: Durable snapshots of in-memory ledgers

pub mod config;
pub mod context;
pub mod errors;
pub mod ledger;
pub mod snapshot;
pub mod storage;

pub use config::{AllowancePolicy, LedgerConfig};
pub use context::{CallContext, CallerIdentity};
pub use errors::{LedgerError, SnapshotError};
pub use ledger::{InitOutcome, Ledger, LedgerMeta};
pub use storage::{MemoryStorage, Storage};

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
