//! In-memory account directory and credential store.
//!
//! Backs the dry-run tooling and tests. Accounts are keyed by realm and
//! exact username; credential kinds are tracked per account id.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::account::{AccountDirectory, CredentialKind, CredentialStore, LocalAccount};
use crate::error::AutoLinkResult;

/// In-memory implementation of [`AccountDirectory`] and [`CredentialStore`].
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: RwLock<HashMap<(Uuid, String), LocalAccount>>,
    credentials: RwLock<HashMap<Uuid, HashSet<CredentialKind>>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account, replacing any account with the same username in the realm.
    pub fn insert_account(&self, realm_id: Uuid, username: impl Into<String>) -> LocalAccount {
        let account = LocalAccount::new(realm_id, username);
        self.accounts
            .write()
            .insert((realm_id, account.username.clone()), account.clone());
        account
    }

    /// Marks a credential kind as configured for an account.
    pub fn add_credential(&self, account_id: Uuid, kind: CredentialKind) {
        self.credentials
            .write()
            .entry(account_id)
            .or_default()
            .insert(kind);
    }

    /// Removes a configured credential kind from an account.
    pub fn remove_credential(&self, account_id: Uuid, kind: CredentialKind) {
        if let Some(kinds) = self.credentials.write().get_mut(&account_id) {
            kinds.remove(&kind);
        }
    }

    /// Returns the number of accounts across all realms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Checks if the directory has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryDirectory {
    async fn lookup_by_username(
        &self,
        realm_id: Uuid,
        username: &str,
    ) -> AutoLinkResult<Option<LocalAccount>> {
        Ok(self
            .accounts
            .read()
            .get(&(realm_id, username.to_string()))
            .cloned())
    }
}

#[async_trait]
impl CredentialStore for InMemoryDirectory {
    async fn is_configured_for(
        &self,
        account: &LocalAccount,
        kind: CredentialKind,
    ) -> AutoLinkResult<bool> {
        Ok(self
            .credentials
            .read()
            .get(&account.id)
            .is_some_and(|kinds| kinds.contains(&kind)))
    }
}
