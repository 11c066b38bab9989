//! Shared collaborators for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kc_nin_autolink::{
    AccountDirectory, AuthenticationSessionSnapshot, AutoLinkError, AutoLinkResult,
    CredentialKind, CredentialStore, InMemoryDirectory, LinkDecisionEngine, LocalAccount,
    LoginSession, NoteMap, SessionUser,
};
use uuid::Uuid;

/// Identity number used across scenarios.
pub const NIN: &str = "12345678901";

/// Masked form of [`NIN`].
pub const MASKED_NIN: &str = "123456***01";

/// Broker marker value.
pub const BROKER_ID: &str = "idporten.a1b2c3";

/// Creates an engine backed by one in-memory directory.
pub fn memory_engine(directory: &Arc<InMemoryDirectory>) -> LinkDecisionEngine {
    LinkDecisionEngine::new(directory.clone(), directory.clone())
}

/// Creates a brokered session carrying the identity number as a user session note.
pub fn broker_session_with_nin(realm_id: Uuid) -> AuthenticationSessionSnapshot {
    AuthenticationSessionSnapshot::new(realm_id)
        .with_user_session_note("BROKER_SESSION_ID", BROKER_ID)
        .with_user_session_note("nin", NIN)
}

/// Directory whose lookups always fail.
#[derive(Debug, Default)]
pub struct FailingDirectory;

#[async_trait]
impl AccountDirectory for FailingDirectory {
    async fn lookup_by_username(
        &self,
        _realm_id: Uuid,
        _username: &str,
    ) -> AutoLinkResult<Option<LocalAccount>> {
        Err(AutoLinkError::directory("user provider unavailable"))
    }
}

/// Credential store whose queries always fail.
#[derive(Debug, Default)]
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn is_configured_for(
        &self,
        _account: &LocalAccount,
        _kind: CredentialKind,
    ) -> AutoLinkResult<bool> {
        Err(AutoLinkError::credential_store("credential manager unavailable"))
    }
}

/// Host whose lookups fail with a message that repeats the username.
#[derive(Debug, Default)]
pub struct EchoingFailures;

#[async_trait]
impl AccountDirectory for EchoingFailures {
    async fn lookup_by_username(
        &self,
        _realm_id: Uuid,
        username: &str,
    ) -> AutoLinkResult<Option<LocalAccount>> {
        Err(AutoLinkError::directory(format!("query for user '{username}' timed out")))
    }
}

#[async_trait]
impl CredentialStore for EchoingFailures {
    async fn is_configured_for(
        &self,
        account: &LocalAccount,
        kind: CredentialKind,
    ) -> AutoLinkResult<bool> {
        Err(AutoLinkError::credential_store(format!(
            "{kind} lookup failed for {}",
            account.username
        )))
    }
}

/// Directory that ignores case, as some host user stores do.
#[derive(Debug)]
pub struct CaseFoldingDirectory {
    pub account: LocalAccount,
}

#[async_trait]
impl AccountDirectory for CaseFoldingDirectory {
    async fn lookup_by_username(
        &self,
        realm_id: Uuid,
        username: &str,
    ) -> AutoLinkResult<Option<LocalAccount>> {
        let matches = realm_id == self.account.realm_id
            && self.account.username.eq_ignore_ascii_case(username);
        Ok(matches.then(|| self.account.clone()))
    }
}

/// Which part of the session cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    ClientNotes,
    UserSessionNotes,
    CurrentUser,
}

/// Session wrapper that fails to read one of its parts.
#[derive(Debug)]
pub struct FaultySession {
    pub inner: AuthenticationSessionSnapshot,
    pub fault: Fault,
}

impl FaultySession {
    fn check(&self, part: Fault) -> AutoLinkResult<()> {
        if self.fault == part {
            Err(AutoLinkError::session_state(format!("{part:?} unreadable")))
        } else {
            Ok(())
        }
    }
}

impl LoginSession for FaultySession {
    fn session_id(&self) -> Uuid {
        self.inner.session_id()
    }

    fn realm_id(&self) -> Uuid {
        self.inner.realm_id()
    }

    fn client_notes(&self) -> AutoLinkResult<Option<&NoteMap>> {
        self.check(Fault::ClientNotes)?;
        self.inner.client_notes()
    }

    fn user_session_notes(&self) -> AutoLinkResult<Option<&NoteMap>> {
        self.check(Fault::UserSessionNotes)?;
        self.inner.user_session_notes()
    }

    fn current_user(&self) -> AutoLinkResult<Option<&SessionUser>> {
        self.check(Fault::CurrentUser)?;
        self.inner.current_user()
    }
}

/// In-memory sink for formatted log output.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Returns everything logged so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captures all log output on the current thread until the guard is dropped.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
