//! Auto-link configuration.
//!
//! The authenticator exposes no admin-configurable properties to the host.
//! These settings are deployment-time and default to the keys written by the
//! identity provider mappers of the first broker login flow.

use serde::{Deserialize, Serialize};

use crate::account::CredentialKind;
use crate::error::{AutoLinkError, AutoLinkResult};

/// Note key present in a brokered login.
pub const BROKER_SESSION_NOTE: &str = "BROKER_SESSION_ID";

/// Note key holding the identity number claim.
pub const IDENTITY_NUMBER_CLAIM: &str = "nin";

/// User attribute holding the identity number.
pub const IDENTITY_NUMBER_ATTRIBUTE: &str = "nin";

/// Settings for the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoLinkConfig {
    /// Note key that marks a brokered login.
    pub broker_marker_note: String,
    /// Note key carrying the identity number claim.
    pub identity_claim: String,
    /// Current-user attribute carrying the identity number.
    pub identity_attribute: String,
    /// Credential kind that blocks auto-linking when configured.
    pub credential_kind: CredentialKind,
}

impl Default for AutoLinkConfig {
    fn default() -> Self {
        Self {
            broker_marker_note: BROKER_SESSION_NOTE.to_string(),
            identity_claim: IDENTITY_NUMBER_CLAIM.to_string(),
            identity_attribute: IDENTITY_NUMBER_ATTRIBUTE.to_string(),
            credential_kind: CredentialKind::Password,
        }
    }
}

impl AutoLinkConfig {
    /// Parses and validates configuration from TOML.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::Config` if the TOML is malformed or a key is blank.
    pub fn from_toml(content: &str) -> AutoLinkResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AutoLinkError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::Config` if any key is blank.
    pub fn validate(&self) -> AutoLinkResult<()> {
        let keys = [
            ("broker_marker_note", &self.broker_marker_note),
            ("identity_claim", &self.identity_claim),
            ("identity_attribute", &self.identity_attribute),
        ];

        for (name, value) in keys {
            if value.trim().is_empty() {
                return Err(AutoLinkError::Config(format!("{name} must not be blank")));
            }
        }
        Ok(())
    }
}
