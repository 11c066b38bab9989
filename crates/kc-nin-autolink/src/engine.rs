//! Linking decision engine.
//!
//! Evaluates one login attempt in a fixed order and stops at the first
//! state that makes auto-linking inapplicable:
//!
//! 1. broker login context, else [`DecisionState::NotBroker`]
//! 2. identity number present, else [`DecisionState::NoIdentityNumber`]
//! 3. account with that username, else [`DecisionState::NoMatchingAccount`]
//! 4. no configured credential, else [`DecisionState::AccountHasCredentials`]
//! 5. [`DecisionState::Linked`]
//!
//! Any error escaping these steps becomes [`DecisionState::InternalError`]
//! and the engine abstains. The engine holds no per-call state; evaluating
//! the same session twice gives the same decision.
//!
//! ## Fallbacks
//!
//! A failed directory lookup reads as "no match" and a failed credential
//! query reads as "credentials exist". Both keep the engine from linking.
//! Their host error messages are logged with the identity number masked.

use std::sync::Arc;

use uuid::Uuid;

use crate::account::{AccountDirectory, CredentialStore, LocalAccount};
use crate::config::AutoLinkConfig;
use crate::context::is_broker_login_context;
use crate::error::{AutoLinkError, AutoLinkResult};
use crate::extract::{extract_identity_number, ExtractedIdentity};
use crate::identity::IdentityNumber;
use crate::outcome::{Decision, DecisionState};
use crate::session::LoginSession;

/// Decides whether a brokered identity is linked to a local account.
#[derive(Clone)]
pub struct LinkDecisionEngine {
    config: AutoLinkConfig,
    directory: Arc<dyn AccountDirectory>,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for LinkDecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkDecisionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LinkDecisionEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            config: AutoLinkConfig::default(),
            directory,
            credentials,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AutoLinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AutoLinkConfig {
        &self.config
    }

    /// Evaluates one login attempt.
    pub async fn decide(&self, session: &dyn LoginSession) -> Decision {
        let session_id = session.session_id();
        tracing::debug!(%session_id, "Starting identity number auto-link evaluation");

        match self.evaluate(session).await {
            Ok(decision) => decision,
            Err(error) => {
                tracing::error!(%session_id, %error, "Error during identity number auto-link evaluation");
                Decision::internal_error()
            }
        }
    }

    /// Finds the account whose username equals the identity number.
    ///
    /// Lookup failures are logged and read as no match. Attribute-based
    /// search is not supported.
    pub async fn resolve_account(
        &self,
        realm_id: Uuid,
        number: &IdentityNumber,
    ) -> Option<LocalAccount> {
        let account = match self
            .directory
            .lookup_by_username(realm_id, number.as_str())
            .await
        {
            Ok(account) => account,
            Err(error) => {
                tracing::error!(
                    identity_number = %number,
                    error = %number.redact(&error.to_string()),
                    "Error finding account by identity number"
                );
                return None;
            }
        };

        match account {
            Some(account) if account.username == number.as_str() => {
                tracing::debug!(account_id = %account.id, "Found account by username matching identity number");
                Some(account)
            }
            Some(account) => {
                tracing::debug!(
                    account_id = %account.id,
                    "Directory returned an account whose username differs from the identity number, ignoring"
                );
                None
            }
            None => {
                tracing::debug!("Account not found by username, attribute search not supported");
                None
            }
        }
    }

    /// Checks whether the account has the configured credential kind.
    ///
    /// Query failures are logged and read as `true`.
    pub async fn has_stored_credential(&self, account: &LocalAccount) -> bool {
        let kind = self.config.credential_kind;
        match self.credentials.is_configured_for(account, kind).await {
            Ok(configured) => configured,
            Err(error) => {
                tracing::warn!(
                    account_id = %account.id,
                    credential_kind = %kind,
                    error = %redacted(&error, &account.username),
                    "Error checking stored credentials, assuming they exist"
                );
                true
            }
        }
    }

    async fn evaluate(&self, session: &dyn LoginSession) -> AutoLinkResult<Decision> {
        if !is_broker_login_context(session, &self.config.broker_marker_note)? {
            tracing::debug!("Not in broker login context, continuing normal flow");
            return Ok(Decision::defer(DecisionState::NotBroker));
        }

        let Some(ExtractedIdentity { number, source }) =
            extract_identity_number(session, &self.config)
        else {
            tracing::debug!("No identity number found in brokered identity");
            return Ok(Decision::defer(DecisionState::NoIdentityNumber));
        };
        tracing::debug!(identity_number = %number, ?source, "Found identity number in brokered identity");

        let Some(account) = self.resolve_account(session.realm_id(), &number).await else {
            tracing::debug!(identity_number = %number, "No local account found for identity number");
            return Ok(Decision::defer(DecisionState::NoMatchingAccount));
        };

        if self.has_stored_credential(&account).await {
            tracing::debug!(account_id = %account.id, "Account has stored credentials, cannot auto-link");
            return Ok(Decision::defer(DecisionState::AccountHasCredentials));
        }

        tracing::info!(account_id = %account.id, identity_number = %number, "Auto-linking brokered identity");
        Ok(Decision::linked(account))
    }
}

/// Renders a host error with any occurrence of the username masked.
fn redacted(error: &AutoLinkError, username: &str) -> String {
    let message = error.to_string();
    match IdentityNumber::parse(username) {
        Some(number) => number.redact(&message),
        None => message,
    }
}
