//! Broker login detection.

use crate::error::AutoLinkResult;
use crate::session::LoginSession;

/// Checks whether the session belongs to a brokered login.
///
/// The marker note may sit in either the client notes or the user session
/// notes, depending on where the broker stored it. Missing maps read as empty.
///
/// ## Errors
///
/// Propagates `AutoLinkError::SessionState` if a note map cannot be read.
pub fn is_broker_login_context(session: &dyn LoginSession, marker: &str) -> AutoLinkResult<bool> {
    if session
        .client_notes()?
        .is_some_and(|notes| notes.contains_key(marker))
    {
        return Ok(true);
    }

    Ok(session
        .user_session_notes()?
        .is_some_and(|notes| notes.contains_key(marker)))
}
