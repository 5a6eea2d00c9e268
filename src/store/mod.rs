//! Account persistence: the durable file tier, the volatile cache tier and
//! the contract both share.

mod file;
pub mod format;
mod memory;

pub use file::FileStore;
pub use memory::MemoryCache;

use crate::{entities::Account, error::StoreResult};

/// Read/write contract shared by every persistence tier.
///
/// Unknown usernames are `Ok(None)`/`Ok(false)`, not errors.
pub trait AccountRepository {
    /// Inserts or replaces the account keyed by its username.
    fn save(&mut self, account: &Account) -> StoreResult<()>;

    fn get_account(&mut self, username: &str) -> StoreResult<Option<Account>>;

    fn exists_by_name(&self, username: &str) -> StoreResult<bool>;

    /// Records who is logged in; `None` clears it.
    fn set_current_username(&mut self, username: Option<&str>) -> StoreResult<()>;

    fn current_username(&self) -> StoreResult<Option<String>>;
}
