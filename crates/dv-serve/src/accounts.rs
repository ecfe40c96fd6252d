//! The account registry: maps an account identifier to its backend
//! configuration. Pure lookup; the registry holds no mutable state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One configured account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The identifier clients pass as `accountID`.
    pub id: String,
    /// Human-readable name, for logs and config files.
    pub name: String,
    /// The account backend's client-view endpoint. An account without one
    /// is fetch-disabled: pulls re-serve the last known state.
    #[serde(default)]
    pub client_view_url: Option<String>,
}

/// Lookup table over the configured accounts.
#[derive(Clone, Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Account>,
}

impl AccountRegistry {
    /// Build a registry from a list of accounts. Later duplicates win.
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect(),
        }
    }

    /// Resolve an `accountID`, or `None` if it is not configured.
    pub fn lookup(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Number of configured accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no accounts are configured.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            name: id.to_string(),
            client_view_url: None,
        }
    }

    #[test]
    fn lookup_known_account() {
        let registry = AccountRegistry::new(vec![account("a1"), account("a2")]);
        assert_eq!(registry.lookup("a1"), Some(&account("a1")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_unknown_account() {
        let registry = AccountRegistry::new(vec![account("a1")]);
        assert!(registry.lookup("bonk").is_none());
    }

    #[test]
    fn empty_registry() {
        let registry = AccountRegistry::new(vec![]);
        assert!(registry.is_empty());
        assert!(registry.lookup("anything").is_none());
    }
}
