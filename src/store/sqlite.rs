use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        password_digest: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        text: row.get(2)?,
        created_on: parse_date(3, &row.get::<_, String>(3)?)?,
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // User operations

    fn create_user(&self, name: &str, password_digest: &str) -> Result<User> {
        let conn = self.conn();
        let created_at = Utc::now();
        let result = conn.execute(
            "INSERT INTO users (name, password_digest, created_at) VALUES (?1, ?2, ?3)",
            params![name, password_digest, format_datetime(&created_at)],
        );

        match result {
            Ok(_) => Ok(User {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                password_digest: password_digest.to_string(),
                created_at,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, password_digest, created_at FROM users WHERE id = ?1",
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, password_digest, created_at FROM users WHERE name = ?1",
            params![name],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, password_digest, created_at FROM users ORDER BY id")?;

        let rows = stmt.query_map([], user_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Note operations

    fn create_note(&self, note: &NewNote) -> Result<Note> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO notes (owner_id, text, created_on) VALUES (?1, ?2, ?3)",
            params![note.owner_id, note.text, format_date(&note.created_on)],
        );

        match result {
            Ok(_) => Ok(Note {
                id: conn.last_insert_rowid(),
                owner_id: note.owner_id,
                text: note.text.clone(),
                created_on: note.created_on,
            }),
            // Unknown owner (foreign key) or blank text (check constraint)
            Err(rusqlite::Error::SqliteFailure(err, msg))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                if msg.as_deref().is_some_and(|m| m.contains("FOREIGN KEY")) {
                    Err(Error::NotFound)
                } else {
                    Err(Error::EmptyNote)
                }
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, owner_id, text, created_on FROM notes WHERE id = ?1",
            params![id],
            note_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_notes(&self, owner_id: i64) -> Result<Vec<Note>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, text, created_on FROM notes WHERE owner_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![owner_id], note_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_notes(&self, owner_id: i64) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn delete_note(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn purge_notes_over(&self, owner_id: i64, max_notes: usize) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM notes WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;

        if count <= i64::try_from(max_notes).unwrap_or(i64::MAX) {
            return Ok(0);
        }

        let deleted = tx.execute("DELETE FROM notes WHERE owner_id = ?1", params![owner_id])?;
        tx.commit()?;
        Ok(deleted)
    }
}
