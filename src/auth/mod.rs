mod authenticator;
mod middleware;
mod password;
pub mod session;

pub use authenticator::{AuthResult, authenticate};
pub use middleware::{AuthError, CurrentPrincipal, RequireUser};
pub use password::PasswordHasher;
