//! Local accounts and the host lookups that resolve them.
//!
//! The engine never creates or mutates accounts. It reads them through
//! [`AccountDirectory`] and asks [`CredentialStore`] whether a credential
//! is configured.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AutoLinkResult;
use crate::identity::mask_identity_number;

/// Credential kind checked by the credential gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialKind {
    /// Password credential.
    Password,
    /// TOTP credential.
    Otp,
    /// `WebAuthn` second factor.
    Webauthn,
    /// `WebAuthn` passwordless credential.
    WebauthnPasswordless,
}

impl CredentialKind {
    /// Returns the credential type name used by the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Otp => "otp",
            Self::Webauthn => "webauthn",
            Self::WebauthnPasswordless => "webauthn-passwordless",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local account that a brokered identity may be linked to.
///
/// ## Security Note
///
/// The username may itself be an identity number. Log the account `id`,
/// never the username. `Debug` renders the username masked.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalAccount {
    /// Unique identifier.
    pub id: Uuid,
    /// Realm the account belongs to.
    pub realm_id: Uuid,
    /// Username, unique within the realm.
    pub username: String,
}

impl LocalAccount {
    /// Creates an account with a fresh identifier.
    #[must_use]
    pub fn new(realm_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            realm_id,
            username: username.into(),
        }
    }
}

impl fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAccount")
            .field("id", &self.id)
            .field("realm_id", &self.realm_id)
            .field("username", &mask_identity_number(&self.username))
            .finish()
    }
}

/// Account lookup provided by the host.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Gets an account by exact username within a realm.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::Directory` if the lookup cannot be performed.
    async fn lookup_by_username(
        &self,
        realm_id: Uuid,
        username: &str,
    ) -> AutoLinkResult<Option<LocalAccount>>;
}

/// Credential configuration query provided by the host.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Checks whether the account has a credential of the given kind configured.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::CredentialStore` if the query cannot be performed.
    async fn is_configured_for(
        &self,
        account: &LocalAccount,
        kind: CredentialKind,
    ) -> AutoLinkResult<bool>;
}
