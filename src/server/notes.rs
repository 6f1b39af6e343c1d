use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use super::AppState;
use super::response::PageError;
use crate::auth::RequireUser;
use crate::error::Error;
use crate::types::Principal;

pub async fn delete_note(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<i64>,
) -> Result<Redirect, PageError> {
    let principal = Principal::User(auth.user);

    match state.notes().delete_note(&principal, note_id) {
        Ok(()) => Ok(Redirect::to("/")),
        // Deleting a note that is already gone is not worth an error page
        Err(Error::NotFound) => {
            tracing::debug!("note {note_id} not found, nothing to delete");
            Ok(Redirect::to("/"))
        }
        Err(e) => Err(e.into()),
    }
}
