use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("note text cannot be empty")]
    EmptyNote,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, Error>;
