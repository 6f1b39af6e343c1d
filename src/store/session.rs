//! Server-side session persistence for `tower-sessions`.
//!
//! Sessions live in the `sessions` table of the application database so that
//! every worker sees the same state. Session data is stored as a JSON object
//! and the expiry as unix seconds; expired rows are never loaded and are
//! removed by [`SqliteSessionStore::delete_expired`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};

use super::SqliteStore;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct SqliteSessionStore {
    store: Arc<SqliteStore>,
}

impl fmt::Debug for SqliteSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSessionStore").finish_non_exhaustive()
    }
}

impl SqliteSessionStore {
    /// Wraps an initialized store; the `sessions` table is part of its schema.
    #[must_use]
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// Removes every session whose expiry has passed.
    pub fn delete_expired(&self) -> Result<usize> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let rows = self
            .store
            .connection()
            .execute("DELETE FROM sessions WHERE expiry_date <= ?1", params![now])?;
        Ok(rows)
    }

    /// Runs [`Self::delete_expired`] every `period` until the task is dropped.
    pub async fn continuously_delete_expired(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match self.delete_expired() {
                Ok(0) => {}
                Ok(n) => tracing::debug!("Removed {n} expired sessions"),
                Err(e) => tracing::warn!("Failed to remove expired sessions: {e}"),
            }
        }
    }

    fn insert(&self, record: &Record) -> Result<bool> {
        let data = encode(record)?;
        let rows = self.store.connection().execute(
            "INSERT OR IGNORE INTO sessions (id, data, expiry_date) VALUES (?1, ?2, ?3)",
            params![
                record.id.to_string(),
                data,
                record.expiry_date.unix_timestamp()
            ],
        )?;
        Ok(rows > 0)
    }

    fn upsert(&self, record: &Record) -> Result<()> {
        let data = encode(record)?;
        self.store.connection().execute(
            "INSERT INTO sessions (id, data, expiry_date) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, expiry_date = excluded.expiry_date",
            params![
                record.id.to_string(),
                data,
                record.expiry_date.unix_timestamp()
            ],
        )?;
        Ok(())
    }

    fn fetch(&self, id: &Id) -> Result<Option<Record>> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let row: Option<(String, i64)> = self
            .store
            .connection()
            .query_row(
                "SELECT data, expiry_date FROM sessions WHERE id = ?1 AND expiry_date > ?2",
                params![id.to_string(), now],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, expiry)) = row else {
            return Ok(None);
        };

        let data = serde_json::from_str(&data)
            .map_err(|e| Error::Session(format!("invalid session data: {e}")))?;
        let expiry_date = OffsetDateTime::from_unix_timestamp(expiry)
            .map_err(|e| Error::Session(format!("invalid session expiry: {e}")))?;

        Ok(Some(Record {
            id: *id,
            data,
            expiry_date,
        }))
    }

    fn remove(&self, id: &Id) -> Result<()> {
        self.store
            .connection()
            .execute("DELETE FROM sessions WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }
}

fn encode(record: &Record) -> Result<String> {
    serde_json::to_string(&record.data)
        .map_err(|e| Error::Session(format!("failed to encode session data: {e}")))
}

fn backend(e: Error) -> session_store::Error {
    match e {
        Error::Session(msg) => session_store::Error::Decode(msg),
        other => session_store::Error::Backend(other.to_string()),
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while !self.insert(record).map_err(backend)? {
            record.id = Id::default();
        }
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.upsert(record).map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        self.fetch(session_id).map_err(backend)
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.remove(session_id).map_err(backend)
    }
}
