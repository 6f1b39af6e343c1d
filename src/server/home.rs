use std::sync::Arc;

use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tower_sessions::Session;

use super::AppState;
use super::flash::{flash, take_flashes};
use super::response::PageError;
use super::views;
use crate::auth::{CurrentPrincipal, RequireUser};
use crate::error::Error;
use crate::types::Principal;

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub note: String,
}

pub async fn show_home(
    auth: CurrentPrincipal,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    render_home(&state, &auth.principal, &auth.session).await
}

pub async fn submit_note(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Form(form): Form<NoteForm>,
) -> Result<Html<String>, PageError> {
    let RequireUser { user, session } = auth;
    let principal = Principal::User(user);

    match state.notes().create_note(&principal, &form.note) {
        Ok(_) => {}
        Err(Error::EmptyNote) => flash(&session, "A note needs some text.").await?,
        Err(e) => return Err(e.into()),
    }

    render_home(&state, &principal, &session).await
}

async fn render_home(
    state: &AppState,
    principal: &Principal,
    session: &Session,
) -> Result<Html<String>, PageError> {
    let notes = match principal.user() {
        Some(user) => state.notes().list_notes(user.id)?,
        None => Vec::new(),
    };
    let flashes = take_flashes(session).await?;
    let image = state.images.random_url();

    Ok(views::home_page(
        principal.user(),
        &notes,
        image.as_deref(),
        &flashes,
    ))
}
