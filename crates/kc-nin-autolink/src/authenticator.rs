//! Authenticator plug-in surface.
//!
//! The host flow engine creates authenticators through an
//! [`AuthenticatorFactory`] and calls [`Authenticator::authenticate`] once per
//! execution. [`NinAutoLinkAuthenticator`] wraps the decision engine and
//! reports its outcome through the host's [`OutcomeSink`].

use async_trait::async_trait;
use serde::Serialize;

use crate::account::LocalAccount;
use crate::engine::LinkDecisionEngine;
use crate::outcome::OutcomeSink;
use crate::session::LoginSession;

/// Provider id of the auto-link authenticator.
pub const PROVIDER_ID: &str = "nin-auto-link";

/// Display name shown in the flow editor.
pub const DISPLAY_TYPE: &str = "NiN Auto-Link";

/// Reference category of the authenticator.
pub const REFERENCE_CATEGORY: &str = "broker";

const HELP_TEXT: &str = "Automatically links federated IdP accounts to local users based on NiN \
     (national identity number) matching. Use it in the First Broker Login flow in place of \
     the password verification step when the local user with a matching NiN has no stored \
     credentials.";

const REQUIREMENT_CHOICES: &[Requirement] = &[Requirement::Required, Requirement::Disabled];

/// Execution requirement selectable for an authenticator in a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    /// The execution must run.
    Required,
    /// One of several alternatives.
    Alternative,
    /// The execution is skipped.
    Disabled,
    /// The execution runs when its condition holds.
    Conditional,
}

/// An admin-facing configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    /// Property name.
    pub name: String,
    /// Label.
    pub label: String,
    /// Help text.
    pub help_text: String,
    /// Property type (e.g. `String`, `boolean`).
    pub property_type: String,
}

/// Metadata the factory exposes to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatorMetadata {
    /// Provider id.
    pub id: &'static str,
    /// Display name.
    pub display_type: &'static str,
    /// Reference category.
    pub reference_category: &'static str,
    /// Whether admins can configure the execution.
    pub configurable: bool,
    /// Selectable requirements.
    pub requirement_choices: Vec<Requirement>,
    /// Whether the user can set the authenticator up.
    pub user_setup_allowed: bool,
    /// Help text.
    pub help_text: &'static str,
    /// Configuration properties.
    pub config_properties: Vec<ConfigProperty>,
}

/// Authenticator trait.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the authenticator ID.
    fn id(&self) -> &'static str;

    /// Checks if this authenticator requires a user to be set.
    fn requires_user(&self) -> bool {
        true
    }

    /// Checks if the authenticator is set up for the given user.
    fn configured_for(&self, _account: &LocalAccount) -> bool {
        true
    }

    /// Runs the authenticator. Exactly one sink operation is invoked.
    async fn authenticate(&self, session: &dyn LoginSession, sink: &mut dyn OutcomeSink);

    /// Handles the flow resuming after a form submission.
    async fn action(&self, session: &dyn LoginSession, sink: &mut dyn OutcomeSink);

    /// Releases resources held by the authenticator.
    fn close(&self) {}
}

/// Authenticator factory trait.
pub trait AuthenticatorFactory: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &'static str;

    /// Returns the display name.
    fn display_type(&self) -> &'static str;

    /// Returns the reference category.
    fn reference_category(&self) -> &'static str;

    /// Checks if admins can configure executions of this authenticator.
    fn is_configurable(&self) -> bool {
        false
    }

    /// Returns the selectable requirements.
    fn requirement_choices(&self) -> &'static [Requirement];

    /// Checks if users can set this authenticator up themselves.
    fn is_user_setup_allowed(&self) -> bool {
        false
    }

    /// Returns the help text.
    fn help_text(&self) -> &'static str;

    /// Returns the configuration properties.
    fn config_properties(&self) -> Vec<ConfigProperty> {
        Vec::new()
    }

    /// Creates an authenticator instance.
    fn create(&self) -> Box<dyn Authenticator>;

    /// Collects the factory metadata.
    fn metadata(&self) -> AuthenticatorMetadata {
        AuthenticatorMetadata {
            id: self.id(),
            display_type: self.display_type(),
            reference_category: self.reference_category(),
            configurable: self.is_configurable(),
            requirement_choices: self.requirement_choices().to_vec(),
            user_setup_allowed: self.is_user_setup_allowed(),
            help_text: self.help_text(),
            config_properties: self.config_properties(),
        }
    }
}

/// Authenticator that links brokered identities by identity number.
#[derive(Debug, Clone)]
pub struct NinAutoLinkAuthenticator {
    engine: LinkDecisionEngine,
}

impl NinAutoLinkAuthenticator {
    /// Creates the authenticator around a decision engine.
    #[must_use]
    pub const fn new(engine: LinkDecisionEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Authenticator for NinAutoLinkAuthenticator {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    // The user is what this authenticator is looking for.
    fn requires_user(&self) -> bool {
        false
    }

    async fn authenticate(&self, session: &dyn LoginSession, sink: &mut dyn OutcomeSink) {
        let decision = self.engine.decide(session).await;
        decision.outcome.dispatch(sink);
    }

    async fn action(&self, session: &dyn LoginSession, sink: &mut dyn OutcomeSink) {
        tracing::debug!(session_id = %session.session_id(), "No action handled by identity number auto-link");
        sink.defer_to_normal_flow();
    }
}

/// Factory for [`NinAutoLinkAuthenticator`].
#[derive(Debug, Clone)]
pub struct NinAutoLinkAuthenticatorFactory {
    engine: LinkDecisionEngine,
}

impl NinAutoLinkAuthenticatorFactory {
    /// Creates the factory. Every authenticator it creates shares the engine.
    #[must_use]
    pub const fn new(engine: LinkDecisionEngine) -> Self {
        Self { engine }
    }
}

impl AuthenticatorFactory for NinAutoLinkAuthenticatorFactory {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_type(&self) -> &'static str {
        DISPLAY_TYPE
    }

    fn reference_category(&self) -> &'static str {
        REFERENCE_CATEGORY
    }

    fn requirement_choices(&self) -> &'static [Requirement] {
        REQUIREMENT_CHOICES
    }

    fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    fn create(&self) -> Box<dyn Authenticator> {
        Box::new(NinAutoLinkAuthenticator::new(self.engine.clone()))
    }
}
