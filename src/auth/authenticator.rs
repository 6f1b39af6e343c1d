use super::PasswordHasher;
use crate::error::Result;
use crate::store::Store;
use crate::types::User;

/// Outcome of a login attempt.
#[derive(Debug)]
pub enum AuthResult {
    Authenticated(User),
    UnknownUser,
    WrongPassword,
}

impl AuthResult {
    /// Message shown to the user after a failed attempt.
    #[must_use]
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            AuthResult::Authenticated(_) => None,
            AuthResult::UnknownUser => Some("That user doesn't exist."),
            AuthResult::WrongPassword => Some("Password incorrect, please try again."),
        }
    }
}

/// Checks a name and password against the stored credentials.
///
/// Only reads the store; establishing a session is up to the caller.
pub fn authenticate(store: &dyn Store, name: &str, password: &str) -> Result<AuthResult> {
    let Some(user) = store.get_user_by_name(name)? else {
        tracing::debug!("login attempt for unknown user '{name}'");
        return Ok(AuthResult::UnknownUser);
    };

    if !PasswordHasher::new().verify(password, &user.password_digest)? {
        tracing::debug!("wrong password for user {}", user.id);
        return Ok(AuthResult::WrongPassword);
    }

    Ok(AuthResult::Authenticated(user))
}
