//! Persistent key-value storage capability
//!
//! The ledger never touches host storage directly. It talks to a `Storage`
//! implementation keyed by strings and valued by `Amount`:
//! - balances live under `b:{account}`
//! - allowances live under `a:{len(owner)}:{owner}{spender}`
//!
//! The owner length prefix keeps allowance keys unambiguous when account
//! ids contain `:`. Token metadata, including the `initialized` flag, lives
//! in a separate slot so it is as durable as the balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, AllowanceKey};
use types::numeric::{Amount, ZERO};

use crate::ledger::LedgerMeta;

pub const BALANCE_PREFIX: &str = "b:";
pub const ALLOWANCE_PREFIX: &str = "a:";

/// Durable mapping from string keys to amounts.
pub trait Storage {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Option<Amount>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Amount);

    /// Whether the key has ever been written.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Read a value, zero if absent.
    fn get_or_default(&self, key: &str) -> Amount {
        self.get(key).unwrap_or(ZERO)
    }

    /// Every entry whose key starts with `prefix`, in key order.
    fn scan(&self, prefix: &str) -> Vec<(String, Amount)>;

    /// Token metadata written by `init`, `None` on a fresh store.
    fn load_meta(&self) -> Option<LedgerMeta>;

    /// Persist token metadata.
    fn store_meta(&mut self, meta: &LedgerMeta);
}

/// Zero-default read used by every ledger query.
pub fn amount_of<S: Storage + ?Sized>(storage: &S, key: &str) -> Amount {
    storage.get_or_default(key)
}

/// Storage key for an account balance.
pub fn balance_key(account: &str) -> String {
    format!("{}{}", BALANCE_PREFIX, account)
}

/// Storage key for an (owner, spender) allowance.
pub fn allowance_key(owner: &str, spender: &str) -> String {
    format!("{}{}:{}{}", ALLOWANCE_PREFIX, owner.len(), owner, spender)
}

/// Recover the account from a balance key, `None` for any other key.
pub fn parse_balance_key(key: &str) -> Option<AccountId> {
    key.strip_prefix(BALANCE_PREFIX).map(AccountId::from)
}

/// Recover the (owner, spender) pair from an allowance key.
pub fn parse_allowance_key(key: &str) -> Option<AllowanceKey> {
    let rest = key.strip_prefix(ALLOWANCE_PREFIX)?;
    let (len, pair) = rest.split_once(':')?;
    let len: usize = len.parse().ok()?;
    if !pair.is_char_boundary(len) {
        return None;
    }
    let (owner, spender) = pair.split_at(len);
    Some(AllowanceKey::new(owner, spender))
}

/// In-memory storage backend.
///
/// Uses `BTreeMap` so iteration (and therefore snapshots) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Amount>,
    meta: Option<LedgerMeta>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build storage from previously captured entries.
    pub fn from_entries(entries: BTreeMap<String, Amount>, meta: Option<LedgerMeta>) -> Self {
        Self { entries, meta }
    }

    /// All entries in key order.
    pub fn entries(&self) -> &BTreeMap<String, Amount> {
        &self.entries
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a String, Amount)> + 'a {
        self.entries
            .range(prefix.to_string()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k, *v))
    }

    /// Number of amount entries. Metadata is not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<Amount> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: Amount) {
        self.entries.insert(key.to_string(), value);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn scan(&self, prefix: &str) -> Vec<(String, Amount)> {
        self.scan_prefix(prefix)
            .map(|(k, v)| (k.clone(), v))
            .collect()
    }

    fn load_meta(&self) -> Option<LedgerMeta> {
        self.meta.clone()
    }

    fn store_meta(&mut self, meta: &LedgerMeta) {
        self.meta = Some(meta.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("b:nobody"), None);
        assert!(!storage.contains("b:nobody"));
        assert_eq!(amount_of(&storage, "b:nobody"), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut storage = MemoryStorage::new();
        storage.set("b:alice", 42);
        assert!(storage.contains("b:alice"));
        assert_eq!(storage.get("b:alice"), Some(42));

        storage.set("b:alice", 7);
        assert_eq!(amount_of(&storage, "b:alice"), 7);
    }

    #[test]
    fn test_zero_written_is_still_contained() {
        let mut storage = MemoryStorage::new();
        storage.set("b:alice", 0);
        assert!(storage.contains("b:alice"));
        assert_eq!(storage.get("b:alice"), Some(0));
    }

    #[test]
    fn test_balance_key_round_trip() {
        let key = balance_key("alice.near");
        assert_eq!(key, "b:alice.near");
        assert_eq!(parse_balance_key(&key), Some(AccountId::new("alice.near")));
        assert_eq!(parse_balance_key("a:1:xy"), None);
    }

    #[test]
    fn test_allowance_keys_do_not_collide_on_separator() {
        // "a:b" approving "c" vs "a" approving "b:c"
        let k1 = allowance_key("a:b", "c");
        let k2 = allowance_key("a", "b:c");
        assert_ne!(k1, k2);

        assert_eq!(parse_allowance_key(&k1), Some(AllowanceKey::new("a:b", "c")));
        assert_eq!(parse_allowance_key(&k2), Some(AllowanceKey::new("a", "b:c")));
    }

    #[test]
    fn test_allowance_key_is_ordered_pair() {
        let ab = allowance_key("alice", "bob");
        let ba = allowance_key("bob", "alice");
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_parse_allowance_key_rejects_garbage() {
        assert_eq!(parse_allowance_key("a:x:alice"), None);
        assert_eq!(parse_allowance_key("a:99:alice"), None);
        assert_eq!(parse_allowance_key("b:alice"), None);
    }

    #[test]
    fn test_scan_prefix() {
        let mut storage = MemoryStorage::new();
        storage.set("b:alice", 1);
        storage.set("b:bob", 2);
        storage.set("a:5:alicebob", 3);

        let balances: Vec<_> = storage.scan_prefix(BALANCE_PREFIX).collect();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0], (&"b:alice".to_string(), 1));
        assert_eq!(balances[1], (&"b:bob".to_string(), 2));
        assert_eq!(
            storage.scan(ALLOWANCE_PREFIX),
            vec![("a:5:alicebob".to_string(), 3)]
        );
    }

    #[test]
    fn test_meta_slot_is_separate_from_entries() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load_meta(), None);

        let meta = LedgerMeta {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            total_supply: 100,
            owner: Some(AccountId::new("alice")),
            initialized: true,
        };
        storage.store_meta(&meta);
        assert_eq!(storage.load_meta(), Some(meta));
        assert!(storage.is_empty());
    }
}
