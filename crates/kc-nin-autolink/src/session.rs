//! Read access to the in-flight authentication session.
//!
//! The host flow engine owns the session. The engine only reads the two
//! note maps, the current user and the identifiers through [`LoginSession`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AutoLinkResult;

/// String-to-string note map.
pub type NoteMap = HashMap<String, String>;

/// User already resolved on the session (e.g. by the broker's identity mapping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User identifier.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// User attributes (multi-valued).
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

impl SessionUser {
    /// Creates a user with no attributes.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds a single attribute value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Session accessor supplied by the host.
///
/// A missing note map is reported as `Ok(None)` and reads as empty.
/// An `Err` means the session state could not be read at all.
pub trait LoginSession: Send + Sync {
    /// Returns the session identifier (diagnostics only).
    fn session_id(&self) -> Uuid;

    /// Returns the realm the login happens in.
    fn realm_id(&self) -> Uuid;

    /// Returns the notes scoped to the current authentication attempt.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::SessionState` if the notes cannot be read.
    fn client_notes(&self) -> AutoLinkResult<Option<&NoteMap>>;

    /// Returns the notes scoped to the broader user session.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::SessionState` if the notes cannot be read.
    fn user_session_notes(&self) -> AutoLinkResult<Option<&NoteMap>>;

    /// Returns the user already resolved on this session, if any.
    ///
    /// ## Errors
    ///
    /// Returns `AutoLinkError::SessionState` if the user cannot be read.
    fn current_user(&self) -> AutoLinkResult<Option<&SessionUser>>;
}

/// Owned snapshot of an authentication session.
///
/// Serves as the [`LoginSession`] for hosts that copy session state out
/// before invoking the authenticator, and for fixtures and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSessionSnapshot {
    /// Session identifier.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    /// Realm identifier.
    #[serde(default)]
    pub realm_id: Uuid,
    /// Client notes (current authentication attempt).
    #[serde(default)]
    pub client_notes: Option<NoteMap>,
    /// User session notes (survive across redirects).
    #[serde(default)]
    pub user_session_notes: Option<NoteMap>,
    /// Already-resolved user.
    #[serde(default)]
    pub current_user: Option<SessionUser>,
}

impl AuthenticationSessionSnapshot {
    /// Creates an empty snapshot in the given realm.
    #[must_use]
    pub fn new(realm_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            realm_id,
            client_notes: None,
            user_session_notes: None,
            current_user: None,
        }
    }

    /// Sets a client note.
    #[must_use]
    pub fn with_client_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.client_notes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets a user session note.
    #[must_use]
    pub fn with_user_session_note(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.user_session_notes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the current user.
    #[must_use]
    pub fn with_current_user(mut self, user: SessionUser) -> Self {
        self.current_user = Some(user);
        self
    }
}

impl LoginSession for AuthenticationSessionSnapshot {
    fn session_id(&self) -> Uuid {
        self.id
    }

    fn realm_id(&self) -> Uuid {
        self.realm_id
    }

    fn client_notes(&self) -> AutoLinkResult<Option<&NoteMap>> {
        Ok(self.client_notes.as_ref())
    }

    fn user_session_notes(&self) -> AutoLinkResult<Option<&NoteMap>> {
        Ok(self.user_session_notes.as_ref())
    }

    fn current_user(&self) -> AutoLinkResult<Option<&SessionUser>> {
        Ok(self.current_user.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_has_no_maps() {
        let realm_id = Uuid::now_v7();
        let session = AuthenticationSessionSnapshot::new(realm_id);

        assert_eq!(session.realm_id(), realm_id);
        assert!(session.client_notes().unwrap().is_none());
        assert!(session.user_session_notes().unwrap().is_none());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn notes_are_kept_per_scope() {
        let session = AuthenticationSessionSnapshot::new(Uuid::now_v7())
            .with_client_note("client", "a")
            .with_user_session_note("user", "b");

        let client = session.client_notes().unwrap().unwrap();
        let user = session.user_session_notes().unwrap().unwrap();
        assert_eq!(client.get("client").map(String::as_str), Some("a"));
        assert!(!client.contains_key("user"));
        assert_eq!(user.get("user").map(String::as_str), Some("b"));
    }

    #[test]
    fn first_attribute_returns_first_value() {
        let user = SessionUser::new("broker.user")
            .with_attribute("nin", "12345678901")
            .with_attribute("nin", "10987654321");

        assert_eq!(user.first_attribute("nin"), Some("12345678901"));
        assert_eq!(user.first_attribute("email"), None);
    }

    #[test]
    fn snapshot_deserializes_with_missing_fields() {
        let session: AuthenticationSessionSnapshot = serde_json::from_str(
            r#"{ "user_session_notes": { "BROKER_SESSION_ID": "idp.123", "nin": "12345678901" } }"#,
        )
        .unwrap();

        assert!(session.client_notes.is_none());
        assert!(session.current_user.is_none());
        assert_eq!(session.realm_id, Uuid::nil());
        assert_eq!(
            session
                .user_session_notes
                .as_ref()
                .and_then(|notes| notes.get("nin"))
                .map(String::as_str),
            Some("12345678901")
        );
    }
}
