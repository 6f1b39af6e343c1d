use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};

use super::images::ImageBank;
use super::{home, login, notes};
use crate::config::{RetentionPolicy, SessionConfig};
use crate::error::{Error, Result};
use crate::notes::NoteService;
use crate::store::{SqliteSessionStore, Store};

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub images: ImageBank,
    pub retention: RetentionPolicy,
    /// Served under `/static`.
    pub static_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn notes(&self) -> NoteService<'_> {
        NoteService::new(self.store.as_ref(), self.retention)
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(
    state: Arc<AppState>,
    sessions: SqliteSessionStore,
    session_config: &SessionConfig,
) -> Result<Router> {
    let inactivity = time::Duration::try_from(session_config.inactivity_timeout)
        .map_err(|e| Error::Config(format!("invalid session timeout: {e}")))?;

    let session_layer = SessionManagerLayer::new(sessions)
        .with_secure(session_config.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(inactivity))
        .with_signed(session_config.signing_key()?);

    let static_files = ServeDir::new(&state.static_dir);

    Ok(Router::new()
        .route("/", get(home::show_home).post(home::submit_note))
        .route("/login", get(login::show_login).post(login::submit_login))
        .route("/logout", get(login::logout))
        .route("/delete/{note_id}", get(notes::delete_note))
        .route("/health", get(health))
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(middleware::from_fn(log_request))
        .with_state(state))
}
