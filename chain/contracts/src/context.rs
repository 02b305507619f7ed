//! Caller identity
//!
//! The host runtime tells the contract who is invoking the current
//! operation. Operations that act on behalf of a caller take the identity
//! from here and never from their own arguments.

use types::ids::AccountId;

/// Source of the identity invoking the current operation.
pub trait CallerIdentity {
    /// The account that signed or sent the current invocation.
    fn caller(&self) -> &AccountId;
}

/// Per-invocation context constructed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    sender: AccountId,
}

impl CallContext {
    pub fn new(sender: impl Into<AccountId>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

impl CallerIdentity for CallContext {
    fn caller(&self) -> &AccountId {
        &self.sender
    }
}

impl CallerIdentity for AccountId {
    fn caller(&self) -> &AccountId {
        self
    }
}
