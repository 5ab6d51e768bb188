use crate::error::MigrationError;
use crate::target_store::{AccountId, TargetLibrary};
use anyhow::Result;
use tracing::debug;

/// Looks up a Plex account id by account name.
///
/// Nothing is cached. Plex may rewrite its `accounts` table while a long
/// import is running, so the runner resolves again before every write.
pub struct AccountResolver<'a> {
    name: &'a str,
}

impl<'a> AccountResolver<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Fails with [`MigrationError::AccountNotFound`] when no account matches.
    pub fn resolve<T: TargetLibrary + ?Sized>(&self, target: &T) -> Result<AccountId> {
        let account_id = target
            .account_id_by_name(self.name)?
            .ok_or_else(|| MigrationError::AccountNotFound(self.name.to_string()))?;
        debug!("Plex account {} has id {}", self.name, account_id);
        Ok(account_id)
    }
}
