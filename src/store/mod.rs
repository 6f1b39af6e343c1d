mod schema;
mod session;
mod sqlite;

pub use session::SqliteSessionStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // User operations
    fn create_user(&self, name: &str, password_digest: &str) -> Result<User>;
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;
    fn list_users(&self) -> Result<Vec<User>>;

    // Note operations
    fn create_note(&self, note: &NewNote) -> Result<Note>;
    fn get_note(&self, id: i64) -> Result<Option<Note>>;
    fn list_notes(&self, owner_id: i64) -> Result<Vec<Note>>;
    fn count_notes(&self, owner_id: i64) -> Result<usize>;
    fn delete_note(&self, id: i64) -> Result<bool>;

    /// Deletes every note of `owner_id` when it holds more than `max_notes`.
    /// The count and the delete happen in one transaction.
    /// Returns the number of deleted notes.
    fn purge_notes_over(&self, owner_id: i64, max_notes: usize) -> Result<usize>;
}
