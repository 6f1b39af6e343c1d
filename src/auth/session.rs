//! Session state helpers.
//!
//! The session holds only the authenticated user's id. The full user record is
//! reloaded from the store on every request, so a deleted account stops
//! resolving immediately.

use tower_sessions::Session;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Principal, User};

/// Key for storing the user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Reconstructs the principal from the id stored in the session.
pub fn resolve(store: &dyn Store, session_user_id: Option<i64>) -> Result<Principal> {
    let Some(user_id) = session_user_id else {
        return Ok(Principal::Anonymous);
    };

    match store.get_user(user_id)? {
        Some(user) => Ok(Principal::User(user)),
        None => {
            tracing::debug!("session refers to missing user {user_id}");
            Ok(Principal::Anonymous)
        }
    }
}

pub async fn session_user_id(session: &Session) -> Result<Option<i64>> {
    session
        .get::<i64>(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| Error::Session(e.to_string()))
}

/// Binds the session to `user`, issuing a fresh session id.
pub async fn log_in(session: &Session, user: &User) -> Result<()> {
    session
        .cycle_id()
        .await
        .map_err(|e| Error::Session(e.to_string()))?;
    session
        .insert(SESSION_USER_ID_KEY, user.id)
        .await
        .map_err(|e| Error::Session(e.to_string()))
}

/// Drops all session state. Safe to call on an anonymous session.
pub async fn log_out(session: &Session) -> Result<()> {
    session
        .flush()
        .await
        .map_err(|e| Error::Session(e.to_string()))
}
