//! Note lifecycle rules.
//!
//! Notes are created for, listed by and deleted on behalf of the session
//! principal. Ownership always comes from the principal, never from request
//! input. After each creation by the account named in the [`RetentionPolicy`],
//! that account's notes are purged once they exceed the configured limit.

use chrono::Utc;

use crate::config::RetentionPolicy;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{NewNote, Note, Principal, User};

pub struct NoteService<'a> {
    store: &'a dyn Store,
    retention: RetentionPolicy,
}

impl<'a> NoteService<'a> {
    #[must_use]
    pub fn new(store: &'a dyn Store, retention: RetentionPolicy) -> Self {
        Self { store, retention }
    }

    /// Creates a note owned by the principal and then applies the retention cap.
    ///
    /// The returned note may already be gone if the cap purged the account.
    pub fn create_note(&self, principal: &Principal, text: &str) -> Result<Note> {
        let user = require_user(principal)?;

        if text.trim().is_empty() {
            return Err(Error::EmptyNote);
        }

        let note = self.store.create_note(&NewNote {
            owner_id: user.id,
            text: text.to_string(),
            created_on: Utc::now().date_naive(),
        })?;
        tracing::debug!("user {} created note {}", user.id, note.id);

        self.enforce_retention(user.id)?;

        Ok(note)
    }

    pub fn list_notes(&self, owner_id: i64) -> Result<Vec<Note>> {
        self.store.list_notes(owner_id)
    }

    /// Deletes a note owned by the principal.
    pub fn delete_note(&self, principal: &Principal, note_id: i64) -> Result<()> {
        let user = require_user(principal)?;

        let note = self.store.get_note(note_id)?.ok_or(Error::NotFound)?;
        if note.owner_id != user.id {
            tracing::warn!(
                "user {} tried to delete note {} owned by {}",
                user.id,
                note.id,
                note.owner_id
            );
            return Err(Error::Forbidden);
        }

        if !self.store.delete_note(note.id)? {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn enforce_retention(&self, owner_id: i64) -> Result<()> {
        if !self.retention.applies_to(owner_id) {
            return Ok(());
        }

        let purged = self
            .store
            .purge_notes_over(owner_id, self.retention.max_notes)?;
        if purged > 0 {
            tracing::info!(
                "retention cap of {} reached for account {owner_id}, purged {purged} notes",
                self.retention.max_notes
            );
        }
        Ok(())
    }
}

fn require_user(principal: &Principal) -> Result<&User> {
    principal.user().ok_or(Error::Unauthenticated)
}
