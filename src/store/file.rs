use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{AccountRepository, format::StoreDocument};
use crate::{
    entities::Account,
    error::{StoreError, StoreResult},
};

/// Durable tier backed by one JSON file.
///
/// The whole file is read once by [`FileStore::open`]; reads are served from
/// memory afterwards. Every mutation rewrites the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    accounts: BTreeMap<String, Account>,
    current_username: Option<String>,
}

impl FileStore {
    /// Loads `path`, creating it with an empty document when it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut store =
            Self { path: path.into(), accounts: BTreeMap::new(), current_username: None };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn load(&mut self) -> StoreResult<()> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "store file missing, creating empty store");
                return self.flush();
            },
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        if text.trim().is_empty() {
            debug!(path = %self.path.display(), "store file blank, starting empty");
            return Ok(());
        }

        let doc: StoreDocument = serde_json::from_str(&text)
            .map_err(|source| StoreError::Malformed { path: self.path.clone(), source })?;
        self.current_username = doc.current_user.clone();
        self.accounts = doc.into_accounts()?;

        info!(
            path = %self.path.display(),
            accounts = self.accounts.len(),
            current_user = ?self.current_username,
            "loaded store"
        );
        Ok(())
    }

    /// Rewrites the file from the in-memory table via a sibling temp file and
    /// a rename.
    fn flush(&self) -> StoreResult<()> {
        let doc =
            StoreDocument::from_accounts(self.current_username.as_deref(), self.accounts.values());
        let bytes = serde_json::to_vec_pretty(&doc).map_err(StoreError::Serialize)?;

        let write_err = |source: io::Error| StoreError::Write { path: self.path.clone(), source };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|err| write_err(err.error))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "store written");
        Ok(())
    }
}

impl AccountRepository for FileStore {
    fn save(&mut self, account: &Account) -> StoreResult<()> {
        let username = account.username().to_string();
        debug!(username = %username, "saving account");

        let previous = self.accounts.insert(username.clone(), account.clone());
        if let Err(err) = self.flush() {
            warn!(username = %username, error = %err, "store write failed, rolling back");
            match previous {
                Some(prev) => self.accounts.insert(username, prev),
                None => self.accounts.remove(&username),
            };
            return Err(err);
        }
        Ok(())
    }

    fn get_account(&mut self, username: &str) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get(username).cloned())
    }

    fn exists_by_name(&self, username: &str) -> StoreResult<bool> {
        Ok(self.accounts.contains_key(username))
    }

    fn set_current_username(&mut self, username: Option<&str>) -> StoreResult<()> {
        debug!(username = ?username, "recording current user");

        let previous = std::mem::replace(&mut self.current_username, username.map(str::to_string));
        if let Err(err) = self.flush() {
            warn!(error = %err, "store write failed, restoring previous current user");
            self.current_username = previous;
            return Err(err);
        }
        Ok(())
    }

    fn current_username(&self) -> StoreResult<Option<String>> {
        Ok(self.current_username.clone())
    }
}
