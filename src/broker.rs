// 6.0: broker whitelist. brokers are the only callers allowed to fill pending
// orders; governance adds and removes them. consulted on every fill.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerRegistry {
    brokers: HashSet<AccountId>,
}

impl BrokerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the account was already a broker.
    pub fn add(&mut self, account: AccountId) -> bool {
        self.brokers.insert(account)
    }

    /// Returns false if the account was not a broker (no-op in that case).
    pub fn remove(&mut self, account: AccountId) -> bool {
        self.brokers.remove(&account)
    }

    pub fn is_broker(&self, account: AccountId) -> bool {
        self.brokers.contains(&account)
    }

    pub fn len(&self) -> usize {
        self.brokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brokers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountId> {
        self.brokers.iter()
    }
}
