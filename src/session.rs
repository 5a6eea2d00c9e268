use tracing::info;

use crate::{
    error::{AppResult, StoreResult},
    store::AccountRepository,
};

/// Who is logged in, passed explicitly to whatever needs it.
///
/// The username is mirrored into the repository so it survives restarts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    /// Picks up the user recorded by a previous run.
    pub fn restore<R: AccountRepository>(repo: &R) -> StoreResult<Self> {
        Ok(Self { username: repo.current_username()? })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    pub fn login<R: AccountRepository>(&mut self, repo: &mut R, username: &str) -> AppResult<()> {
        if !repo.exists_by_name(username)? {
            return Err(anyhow::anyhow!("no account named {username:?}").into());
        }
        repo.set_current_username(Some(username))?;
        info!(username = %username, "logged in");
        self.username = Some(username.to_string());
        Ok(())
    }

    pub fn logout<R: AccountRepository>(&mut self, repo: &mut R) -> StoreResult<()> {
        repo.set_current_username(None)?;
        if let Some(username) = self.username.take() {
            info!(username = %username, "logged out");
        }
        Ok(())
    }
}
