//! Contract-specific error types
//!
//! Error taxonomy for ledger operations and snapshot persistence.

use thiserror::Error;
use types::numeric::Amount;

/// Ledger operation errors.
///
/// Every variant aborts the operation before any state is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger is not initialized")]
    NotInitialized,

    #[error("Sender cannot be blank")]
    BlankCaller,

    #[error("Sender balance must be greater than 0: {account}")]
    NoBalance { account: String },

    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: String,
        required: Amount,
        available: Amount,
    },

    #[error("Allowance of {spender} on {owner} exceeded: required {required}, available {available}")]
    InsufficientAllowance {
        owner: String,
        spender: String,
        required: Amount,
        available: Amount,
    },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Circulating supply {circulating} exceeds total supply {total_supply}")]
    SupplyExceeded {
        total_supply: Amount,
        circulating: Amount,
    },
}

impl LedgerError {
    /// True for failed preconditions on an initialized ledger.
    pub fn is_precondition_failure(&self) -> bool {
        !matches!(self, LedgerError::NotInitialized)
    }
}

/// Snapshot persistence errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure { expected: String, actual: String },

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
