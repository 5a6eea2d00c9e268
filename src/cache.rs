use tracing::debug;

use crate::{
    entities::Account,
    error::StoreResult,
    store::{AccountRepository, FileStore, MemoryCache},
};

/// Two-tier repository: reads go to the in-memory cache first and fill it on
/// a miss; writes go to the durable tier, then the cache.
///
/// The cache is only updated once the durable write has succeeded, so a
/// failed write leaves both tiers holding the previous value.
#[derive(Debug)]
pub struct CacheManager<S = FileStore> {
    cache: MemoryCache,
    store: S,
}

impl<S: AccountRepository> CacheManager<S> {
    /// Warms the cache with the persisted current user, if any.
    pub fn new(mut store: S) -> StoreResult<Self> {
        let mut cache = MemoryCache::new();
        if let Some(username) = store.current_username()? {
            if let Some(account) = store.get_account(&username)? {
                debug!(username = %username, "warming cache with current user");
                cache.insert(account);
            }
            cache.set_current(Some(username));
        }
        Ok(Self { cache, store })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    /// Drops a cached account so the next read goes to the durable tier.
    pub fn invalidate(&mut self, username: &str) -> bool {
        self.cache.remove(username).is_some()
    }
}

impl<S: AccountRepository> AccountRepository for CacheManager<S> {
    fn save(&mut self, account: &Account) -> StoreResult<()> {
        self.store.save(account)?;
        self.cache.insert(account.clone());
        Ok(())
    }

    fn get_account(&mut self, username: &str) -> StoreResult<Option<Account>> {
        if let Some(account) = self.cache.get(username) {
            debug!(username = %username, "cache hit");
            return Ok(Some(account.clone()));
        }

        debug!(username = %username, "cache miss, reading store");
        let Some(account) = self.store.get_account(username)? else {
            return Ok(None);
        };
        self.cache.insert(account.clone());
        Ok(Some(account))
    }

    fn exists_by_name(&self, username: &str) -> StoreResult<bool> {
        if self.cache.contains(username) {
            return Ok(true);
        }
        self.store.exists_by_name(username)
    }

    fn set_current_username(&mut self, username: Option<&str>) -> StoreResult<()> {
        self.store.set_current_username(username)?;
        self.cache.set_current(username.map(str::to_string));
        Ok(())
    }

    fn current_username(&self) -> StoreResult<Option<String>> {
        Ok(self.cache.current().map(str::to_string))
    }
}
