use std::collections::HashMap;

use super::AccountRepository;
use crate::{entities::Account, error::StoreResult};

/// Unbounded in-memory tier. Holds only what has been saved or read through
/// it during this process; nothing is ever evicted.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    accounts: HashMap<String, Account>,
    current_username: Option<String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.username().to_string(), account);
    }

    pub fn remove(&mut self, username: &str) -> Option<Account> {
        self.accounts.remove(username)
    }

    pub fn set_current(&mut self, username: Option<String>) {
        self.current_username = username;
    }

    pub fn current(&self) -> Option<&str> {
        self.current_username.as_deref()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for MemoryCache {
    fn save(&mut self, account: &Account) -> StoreResult<()> {
        self.insert(account.clone());
        Ok(())
    }

    fn get_account(&mut self, username: &str) -> StoreResult<Option<Account>> {
        Ok(self.get(username).cloned())
    }

    fn exists_by_name(&self, username: &str) -> StoreResult<bool> {
        Ok(self.contains(username))
    }

    fn set_current_username(&mut self, username: Option<&str>) -> StoreResult<()> {
        self.set_current(username.map(str::to_string));
        Ok(())
    }

    fn current_username(&self) -> StoreResult<Option<String>> {
        Ok(self.current().map(str::to_string))
    }
}
