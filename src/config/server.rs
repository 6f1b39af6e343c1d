use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

use crate::error::{Error, Result};

const MIN_SECRET_LEN: usize = 16;
const SQLITE_PREFIXES: [&str; 2] = ["sqlite://", "sqlite:"];

pub const DEFAULT_DATABASE_URL: &str = "sqlite://jotter.db";
pub const DEFAULT_RETENTION_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Directory served under `/static`. Decorative images live in its `img` subdirectory.
    pub static_dir: PathBuf,
    pub session: SessionConfig,
    pub retention: RetentionPolicy,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {e}")))
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        database_path(&self.database_url)
    }

    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.static_dir.join("img")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4999,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            static_dir: PathBuf::from("./static"),
            session: SessionConfig::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    /// Only send the session cookie over HTTPS.
    pub secure: bool,
    pub inactivity_timeout: Duration,
}

impl SessionConfig {
    /// Derives the cookie signing key from the configured secret.
    pub fn signing_key(&self) -> Result<Key> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(Error::Config(format!(
                "session secret must be at least {MIN_SECRET_LEN} characters"
            )));
        }
        let digest = Sha512::digest(self.secret.as_bytes());
        Ok(Key::from(digest.as_slice()))
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("secure", &self.secure)
            .field("inactivity_timeout", &self.inactivity_timeout)
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            secure: false,
            inactivity_timeout: Duration::from_secs(60 * 60 * 24 * 7),
        }
    }
}

/// Bulk purge rule for a shared demo account.
///
/// Once the designated account holds more than `max_notes` notes, every one of
/// its notes is deleted. Accounts other than `account_id` are never affected,
/// and the rule is off when no account is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub account_id: Option<i64>,
    pub max_notes: usize,
}

impl RetentionPolicy {
    #[must_use]
    pub fn for_account(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn applies_to(&self, owner_id: i64) -> bool {
        self.account_id == Some(owner_id)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            account_id: None,
            max_notes: DEFAULT_RETENTION_LIMIT,
        }
    }
}

/// Resolves a database URL to a SQLite file path.
///
/// Accepts `sqlite://path`, `sqlite:path` or a bare path.
pub fn database_path(url: &str) -> Result<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Config("database url is empty".to_string()));
    }

    for prefix in SQLITE_PREFIXES {
        if let Some(path) = url.strip_prefix(prefix) {
            if path.is_empty() {
                return Err(Error::Config(format!("no database path in '{url}'")));
            }
            return Ok(PathBuf::from(path));
        }
    }

    if let Some((scheme, _)) = url.split_once("://") {
        return Err(Error::Config(format!(
            "unsupported database scheme '{scheme}', only sqlite is available"
        )));
    }

    Ok(PathBuf::from(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_variants() {
        assert_eq!(
            database_path("sqlite://data/notes.db").unwrap(),
            PathBuf::from("data/notes.db")
        );
        assert_eq!(
            database_path("sqlite:///var/lib/jotter.db").unwrap(),
            PathBuf::from("/var/lib/jotter.db")
        );
        assert_eq!(
            database_path("sqlite:notes.db").unwrap(),
            PathBuf::from("notes.db")
        );
        assert_eq!(database_path("notes.db").unwrap(), PathBuf::from("notes.db"));
    }

    #[test]
    fn test_database_path_rejects_other_schemes() {
        let result = database_path("postgres://user:pw@localhost/notes");
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(database_path("sqlite://").is_err());
        assert!(database_path("  ").is_err());
    }

    #[test]
    fn test_signing_key_requires_long_secret() {
        let short = SessionConfig {
            secret: "short".to_string(),
            ..SessionConfig::default()
        };
        assert!(short.signing_key().is_err());

        let long = SessionConfig {
            secret: "a-much-longer-session-secret".to_string(),
            ..SessionConfig::default()
        };
        assert!(long.signing_key().is_ok());
    }

    #[test]
    fn test_retention_scoped_to_one_account() {
        let policy = RetentionPolicy::for_account(2);
        assert!(policy.applies_to(2));
        assert!(!policy.applies_to(1));
        assert_eq!(policy.max_notes, 10);
        assert!(!RetentionPolicy::default().applies_to(2));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 4999);
    }
}
