//! Ledger configuration
//!
//! Behavioral switches fixed at deployment. A host can build the config in
//! code or deserialize it from JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// What `transfer_from` does to the allowance it consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowancePolicy {
    /// Reduce the allowance by the transferred value.
    #[default]
    DecrementOnSpend,
    /// Leave the allowance untouched. Only `approve` changes it.
    Retain,
}

/// Configuration for a ledger deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Credit the initial supply to the account that calls `init`.
    ///
    /// When false, the supply is recorded in metadata only and no account
    /// holds any tokens.
    pub credit_initial_supply: bool,
    /// Allowance handling in `transfer_from`.
    pub allowance_policy: AllowancePolicy,
    /// Reject `init` and snapshot restores that would leave
    /// `sum(balances) > total_supply`. Balances already in the store count.
    pub enforce_supply_cap: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            credit_initial_supply: true,
            allowance_policy: AllowancePolicy::default(),
            enforce_supply_cap: true,
        }
    }
}

impl LedgerConfig {
    /// Configuration matching the legacy contract: no seeded balance and
    /// allowances that survive spending.
    pub fn legacy() -> Self {
        Self {
            credit_initial_supply: false,
            allowance_policy: AllowancePolicy::Retain,
            enforce_supply_cap: true,
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
