use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::AppState;
use super::flash::{flash, take_flashes};
use super::response::PageError;
use super::views;
use crate::auth::session::{log_in, log_out};
use crate::auth::{AuthResult, authenticate};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

pub async fn show_login(session: Session) -> Result<Html<String>, PageError> {
    let flashes = take_flashes(&session).await?;
    Ok(views::login_page(&flashes))
}

pub async fn submit_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, PageError> {
    if form.name.trim().is_empty() || form.password.is_empty() {
        flash(&session, "Name and password are required.").await?;
        return Ok(Redirect::to("/login"));
    }

    match authenticate(state.store.as_ref(), &form.name, &form.password)? {
        AuthResult::Authenticated(user) => {
            log_in(&session, &user).await?;
            tracing::info!("User {} logged in", user.id);
            Ok(Redirect::to("/"))
        }
        failure => {
            if let Some(message) = failure.failure_message() {
                flash(&session, message).await?;
            }
            Ok(Redirect::to("/login"))
        }
    }
}

pub async fn logout(session: Session) -> Result<Redirect, PageError> {
    log_out(&session).await?;
    Ok(Redirect::to("/"))
}
