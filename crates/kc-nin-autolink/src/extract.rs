//! Identity number extraction from the brokered identity.

use serde::Serialize;

use crate::config::AutoLinkConfig;
use crate::error::AutoLinkResult;
use crate::identity::IdentityNumber;
use crate::session::{LoginSession, NoteMap};

/// Where an identity number was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Attribute on the already-resolved current user.
    UserAttribute,
    /// User session note.
    UserSessionNote,
    /// Client note.
    ClientNote,
}

/// An identity number together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIdentity {
    /// The identity number.
    pub number: IdentityNumber,
    /// Where it was read from.
    pub source: IdentitySource,
}

/// Extracts the identity number from the session.
///
/// Sources are checked in order: current-user attribute, user session note,
/// client note. The first non-blank value wins. A failure while reading is
/// logged and treated as not found.
#[must_use]
pub fn extract_identity_number(
    session: &dyn LoginSession,
    config: &AutoLinkConfig,
) -> Option<ExtractedIdentity> {
    match read_sources(session, config) {
        Ok(found) => found,
        Err(error) => {
            tracing::warn!(
                session_id = %session.session_id(),
                %error,
                "Error extracting identity number from brokered identity"
            );
            None
        }
    }
}

fn read_sources(
    session: &dyn LoginSession,
    config: &AutoLinkConfig,
) -> AutoLinkResult<Option<ExtractedIdentity>> {
    let from_user = session
        .current_user()?
        .and_then(|user| user.first_attribute(&config.identity_attribute))
        .and_then(IdentityNumber::parse);
    if let Some(number) = from_user {
        return Ok(Some(found(number, IdentitySource::UserAttribute)));
    }

    if let Some(number) = note_value(session.user_session_notes()?, &config.identity_claim) {
        return Ok(Some(found(number, IdentitySource::UserSessionNote)));
    }

    Ok(note_value(session.client_notes()?, &config.identity_claim)
        .map(|number| found(number, IdentitySource::ClientNote)))
}

fn note_value(notes: Option<&NoteMap>, key: &str) -> Option<IdentityNumber> {
    notes
        .and_then(|notes| notes.get(key))
        .and_then(|value| IdentityNumber::parse(value))
}

const fn found(number: IdentityNumber, source: IdentitySource) -> ExtractedIdentity {
    ExtractedIdentity { number, source }
}
