//! JSON fixtures for dry-run evaluation.

use std::path::Path;

use kc_nin_autolink::{AuthenticationSessionSnapshot, CredentialKind, InMemoryDirectory};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CliError, CliResult};

/// A directory fixture.
///
/// ```json
/// { "accounts": [ { "username": "12345678901", "credentials": ["password"] } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFixture {
    /// Accounts to load.
    #[serde(default)]
    pub accounts: Vec<AccountFixture>,
}

/// An account in a directory fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFixture {
    /// Username.
    pub username: String,
    /// Configured credential kinds.
    #[serde(default)]
    pub credentials: Vec<CredentialKind>,
}

impl DirectoryFixture {
    /// Loads all accounts into a fresh directory in the given realm.
    #[must_use]
    pub fn into_directory(self, realm_id: Uuid) -> InMemoryDirectory {
        let directory = InMemoryDirectory::new();
        for fixture in self.accounts {
            let account = directory.insert_account(realm_id, fixture.username);
            for kind in fixture.credentials {
                directory.add_credential(account.id, kind);
            }
        }
        directory
    }
}

/// Reads a session snapshot.
pub fn read_session(path: &Path) -> CliResult<AuthenticationSessionSnapshot> {
    read_json(path)
}

/// Reads a directory fixture.
pub fn read_directory(path: &Path) -> CliResult<DirectoryFixture> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::Fixture {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
