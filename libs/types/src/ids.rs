//! Identifier types for ledger entities
//!
//! Account identifiers are opaque strings supplied by the host runtime.
//! Equality is exact string match; no normalization is applied.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a token holder.
///
/// Wraps the host's account string verbatim. Two ids are the same account
/// only if their strings are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an AccountId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty.
    ///
    /// A blank caller cannot own or move funds. Any non-empty string,
    /// whitespace included, is a distinct account.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered (owner, spender) pair keying an allowance.
///
/// `(alice, bob)` and `(bob, alice)` are distinct allowances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AllowanceKey {
    pub owner: AccountId,
    pub spender: AccountId,
}

impl AllowanceKey {
    pub fn new(owner: impl Into<AccountId>, spender: impl Into<AccountId>) -> Self {
        Self {
            owner: owner.into(),
            spender: spender.into(),
        }
    }
}

impl fmt::Display for AllowanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.owner, self.spender)
    }
}
