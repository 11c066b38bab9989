//! # kc-nin-autolink
//!
//! Identity-number (NiN) auto-link authenticator for Keycloak Rust.
//!
//! During a first broker login, the authenticator links the brokered
//! identity to an existing local account whose username is the identity
//! number, without asking for the account password. Linking only happens
//! when the account has no password configured; otherwise the flow falls
//! back to the normal "verify existing account" step.
//!
//! ## Decision Order
//!
//! 1. The login must be brokered (`BROKER_SESSION_ID` note present)
//! 2. An identity number must be found (user attribute, user session
//!    note, client note, in that order)
//! 3. A local account must have it as its exact username
//! 4. That account must have no stored password
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-2: Identification and Authentication
//! - IA-8: Identification and Authentication (Non-Organizational Users)
//! - SI-11: Error Handling (identity numbers are masked in all diagnostics)
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kc_nin_autolink::{InMemoryDirectory, LinkDecisionEngine};
//!
//! let directory = Arc::new(InMemoryDirectory::new());
//! let engine = LinkDecisionEngine::new(directory.clone(), directory);
//! let decision = engine.decide(&session).await;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod account;
pub mod authenticator;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod extract;
pub mod identity;
pub mod memory;
pub mod outcome;
pub mod session;

pub use account::{AccountDirectory, CredentialKind, CredentialStore, LocalAccount};
pub use authenticator::{
    Authenticator, AuthenticatorFactory, AuthenticatorMetadata, ConfigProperty,
    NinAutoLinkAuthenticator, NinAutoLinkAuthenticatorFactory, Requirement,
};
pub use config::AutoLinkConfig;
pub use context::is_broker_login_context;
pub use engine::LinkDecisionEngine;
pub use error::{AutoLinkError, AutoLinkResult};
pub use extract::{extract_identity_number, ExtractedIdentity, IdentitySource};
pub use identity::{mask_identity_number, IdentityNumber};
pub use memory::InMemoryDirectory;
pub use outcome::{Decision, DecisionState, FlowSignal, Outcome, OutcomeSink, RecordingSink};
pub use session::{AuthenticationSessionSnapshot, LoginSession, NoteMap, SessionUser};
