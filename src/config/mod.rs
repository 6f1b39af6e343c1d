mod server;

pub use server::{
    DEFAULT_DATABASE_URL, DEFAULT_RETENTION_LIMIT, RetentionPolicy, ServerConfig, SessionConfig,
    database_path,
};
