//! Ledger — Token metadata, balances, and allowances
//!
//! Implements the fungible-token accounting core:
//! - One-shot initialization of name, symbol, and total supply
//! - Balance queries with zero default for unknown accounts
//! - Caller-authorized transfers with checked arithmetic
//! - Absolute-set approvals and allowance-gated delegated transfers
//!
//! Every mutating operation validates all preconditions and computes every
//! new value before the first storage write, so a failed call leaves the
//! ledger untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::ids::{AccountId, AllowanceKey};
use types::numeric::{checked_credit, checked_debit, checked_sum, Amount};

use crate::config::{AllowancePolicy, LedgerConfig};
use crate::context::CallerIdentity;
use crate::errors::LedgerError;
use crate::storage::{
    allowance_key, amount_of, balance_key, parse_allowance_key, parse_balance_key,
    MemoryStorage, Storage, ALLOWANCE_PREFIX, BALANCE_PREFIX,
};

/// Token metadata, written once by `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMeta {
    pub name: String,
    pub symbol: String,
    pub total_supply: Amount,
    /// Account that called `init`. Informational only.
    pub owner: Option<AccountId>,
    pub initialized: bool,
}

/// Result of a call to `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Metadata was recorded by this call.
    Initialized,
    /// The ledger was already initialized; nothing changed.
    AlreadyInitialized,
}

/// Fungible-token ledger over an injected storage backend.
///
/// State machine: `Uninitialized` -> `Initialized`, one way, via `init`.
/// Before initialization, mutating operations fail with
/// `LedgerError::NotInitialized` and queries return empty defaults.
#[derive(Debug, Clone)]
pub struct Ledger<S: Storage = MemoryStorage> {
    meta: LedgerMeta,
    config: LedgerConfig,
    storage: S,
}

impl<S: Storage> Ledger<S> {
    /// Open a ledger over `storage` with the default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, LedgerConfig::default())
    }

    /// Open a ledger over `storage` with an explicit configuration.
    ///
    /// Metadata already persisted in the store is loaded, so a reopened
    /// store stays initialized.
    pub fn with_config(storage: S, config: LedgerConfig) -> Self {
        let meta = storage.load_meta().unwrap_or_default();
        Self {
            meta,
            config,
            storage,
        }
    }

    // ───────────────────────── Initialization ─────────────────────────

    /// Record token metadata. Re-invocation is a silent no-op.
    ///
    /// With `credit_initial_supply` enabled the whole supply is credited to
    /// the caller, which must then be non-blank. With `enforce_supply_cap`
    /// enabled, balances already present in the store count against the
    /// supply and an init that would exceed it is rejected.
    pub fn init(
        &mut self,
        ctx: &impl CallerIdentity,
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: Amount,
    ) -> Result<InitOutcome, LedgerError> {
        if self.meta.initialized {
            debug!("Ledger already initialized, ignoring init");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let caller = ctx.caller();
        let seed = if self.config.credit_initial_supply {
            if caller.is_blank() {
                return Err(rejected("init", LedgerError::BlankCaller));
            }
            let key = balance_key(caller.as_str());
            let seeded = checked_credit(amount_of(&self.storage, &key), initial_supply)
                .ok_or_else(|| rejected("init", LedgerError::Overflow))?;
            Some((key, seeded))
        } else {
            None
        };

        if self.config.enforce_supply_cap {
            let existing = self
                .circulating_supply()
                .map_err(|err| rejected("init", err))?;
            let credited = if seed.is_some() { initial_supply } else { 0 };
            let circulating = checked_credit(existing, credited)
                .ok_or_else(|| rejected("init", LedgerError::Overflow))?;
            if circulating > initial_supply {
                return Err(rejected(
                    "init",
                    LedgerError::SupplyExceeded {
                        total_supply: initial_supply,
                        circulating,
                    },
                ));
            }
        }

        let meta = LedgerMeta {
            name: name.into(),
            symbol: symbol.into(),
            total_supply: initial_supply,
            owner: Some(caller.clone()),
            initialized: true,
        };
        self.storage.store_meta(&meta);
        if let Some((key, seeded)) = seed {
            self.storage.set(&key, seeded);
        }
        self.meta = meta;

        info!(
            token_name = %self.meta.name,
            symbol = %self.meta.symbol,
            total_supply = initial_supply,
            owner = %caller,
            credited = self.config.credit_initial_supply,
            "Ledger initialized"
        );
        Ok(InitOutcome::Initialized)
    }

    // ───────────────────────── Metadata Queries ─────────────────────────

    /// Token name, empty before initialization.
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Token symbol, empty before initialization.
    pub fn symbol(&self) -> &str {
        &self.meta.symbol
    }

    /// Total supply rendered as a decimal string.
    pub fn total_supply(&self) -> String {
        self.meta.total_supply.to_string()
    }

    pub fn total_supply_amount(&self) -> Amount {
        self.meta.total_supply
    }

    pub fn meta(&self) -> &LedgerMeta {
        &self.meta
    }

    pub fn is_initialized(&self) -> bool {
        self.meta.initialized
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ───────────────────────── Balances ─────────────────────────

    /// Balance of `account`, zero if it never held tokens.
    pub fn balance_of(&self, account: &str) -> Amount {
        amount_of(&self.storage, &balance_key(account))
    }

    /// Move `value` tokens from the caller to `to`.
    pub fn transfer(
        &mut self,
        ctx: &impl CallerIdentity,
        to: &str,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        self.ensure_initialized("transfer")?;
        let sender = ctx.caller();
        if sender.is_blank() {
            return Err(rejected("transfer", LedgerError::BlankCaller));
        }

        let sender_key = balance_key(sender.as_str());
        let sender_balance = amount_of(&self.storage, &sender_key);
        if !self.storage.contains(&sender_key) || sender_balance == 0 {
            return Err(rejected(
                "transfer",
                LedgerError::NoBalance {
                    account: sender.to_string(),
                },
            ));
        }
        if sender_balance < value {
            return Err(rejected(
                "transfer",
                LedgerError::InsufficientBalance {
                    account: sender.to_string(),
                    required: value,
                    available: sender_balance,
                },
            ));
        }

        self.move_balance(sender.as_str(), to, value)
            .map_err(|err| rejected("transfer", err))?;

        debug!(from = %sender, to, value, "Transfer applied");
        Ok(true)
    }

    /// Move `value` tokens from `from` to `to` on the caller's allowance.
    ///
    /// The spender is always the caller; the allowance checked is
    /// `allowance(from, caller)`.
    pub fn transfer_from(
        &mut self,
        ctx: &impl CallerIdentity,
        from: &str,
        to: &str,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        self.ensure_initialized("transfer_from")?;
        let spender = ctx.caller();
        if spender.is_blank() {
            return Err(rejected("transfer_from", LedgerError::BlankCaller));
        }

        let available = self.balance_of(from);
        if available < value {
            return Err(rejected(
                "transfer_from",
                LedgerError::InsufficientBalance {
                    account: from.to_string(),
                    required: value,
                    available,
                },
            ));
        }

        let key = allowance_key(from, spender.as_str());
        let allowed = amount_of(&self.storage, &key);
        if value > allowed {
            return Err(rejected(
                "transfer_from",
                LedgerError::InsufficientAllowance {
                    owner: from.to_string(),
                    spender: spender.to_string(),
                    required: value,
                    available: allowed,
                },
            ));
        }
        let remaining = match self.config.allowance_policy {
            AllowancePolicy::DecrementOnSpend => Some(
                checked_debit(allowed, value)
                    .ok_or_else(|| rejected("transfer_from", LedgerError::Overflow))?,
            ),
            AllowancePolicy::Retain => None,
        };

        self.move_balance(from, to, value)
            .map_err(|err| rejected("transfer_from", err))?;
        if let Some(remaining) = remaining {
            self.storage.set(&key, remaining);
        }

        debug!(from, to, spender = %spender, value, "Delegated transfer applied");
        Ok(true)
    }

    // ───────────────────────── Allowances ─────────────────────────

    /// Set the caller's allowance for `spender` to exactly `value`.
    pub fn approve(
        &mut self,
        ctx: &impl CallerIdentity,
        spender: &str,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        self.ensure_initialized("approve")?;
        let owner = ctx.caller();
        if owner.is_blank() {
            return Err(rejected("approve", LedgerError::BlankCaller));
        }

        self.storage.set(&allowance_key(owner.as_str(), spender), value);

        debug!(owner = %owner, spender, value, "Allowance set");
        Ok(true)
    }

    /// Allowance granted by `owner` to `spender`, zero if never approved.
    pub fn allowance(&self, owner: &str, spender: &str) -> Amount {
        amount_of(&self.storage, &allowance_key(owner, spender))
    }

    // ───────────────────────── Internal ─────────────────────────

    fn ensure_initialized(&self, operation: &'static str) -> Result<(), LedgerError> {
        if !self.meta.initialized {
            return Err(rejected(operation, LedgerError::NotInitialized));
        }
        Ok(())
    }

    /// Debit `from` and credit `to`. Both results are computed before
    /// either is written. A self-move writes nothing.
    fn move_balance(&mut self, from: &str, to: &str, value: Amount) -> Result<(), LedgerError> {
        let from_key = balance_key(from);
        let from_balance = amount_of(&self.storage, &from_key);
        let debited =
            checked_debit(from_balance, value).ok_or_else(|| LedgerError::InsufficientBalance {
                account: from.to_string(),
                required: value,
                available: from_balance,
            })?;

        if from == to {
            return Ok(());
        }

        let to_key = balance_key(to);
        let credited =
            checked_credit(amount_of(&self.storage, &to_key), value).ok_or(LedgerError::Overflow)?;

        self.storage.set(&from_key, debited);
        self.storage.set(&to_key, credited);
        Ok(())
    }

    // ───────────────────────── Supply Accounting ─────────────────────────

    /// Sum of every recorded balance.
    pub fn circulating_supply(&self) -> Result<Amount, LedgerError> {
        checked_sum(self.storage.scan(BALANCE_PREFIX).into_iter().map(|(_, v)| v))
            .ok_or(LedgerError::Overflow)
    }

    /// Fail if recorded balances add up to more than the total supply.
    pub fn check_supply_invariant(&self) -> Result<(), LedgerError> {
        let circulating = self.circulating_supply()?;
        if circulating > self.meta.total_supply {
            return Err(LedgerError::SupplyExceeded {
                total_supply: self.meta.total_supply,
                circulating,
            });
        }
        Ok(())
    }

    /// Every account with a recorded balance, in key order.
    pub fn holders(&self) -> Vec<(AccountId, Amount)> {
        self.storage
            .scan(BALANCE_PREFIX)
            .into_iter()
            .filter_map(|(key, value)| parse_balance_key(&key).map(|id| (id, value)))
            .collect()
    }

    /// Every recorded allowance, in key order.
    pub fn allowances(&self) -> Vec<(AllowanceKey, Amount)> {
        self.storage
            .scan(ALLOWANCE_PREFIX)
            .into_iter()
            .filter_map(|(key, value)| parse_allowance_key(&key).map(|k| (k, value)))
            .collect()
    }
}

impl Default for Ledger<MemoryStorage> {
    fn default() -> Self {
        Self::new(MemoryStorage::new())
    }
}

fn rejected(operation: &'static str, err: LedgerError) -> LedgerError {
    warn!(operation, error = %err, "Ledger operation rejected");
    err
}
