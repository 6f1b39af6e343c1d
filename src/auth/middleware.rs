use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use super::session::{resolve, session_user_id};
use crate::server::AppState;
use crate::server::views;
use crate::types::{Principal, User};

/// Extractor for the current principal; anonymous requests are let through.
pub struct CurrentPrincipal {
    pub principal: Principal,
    pub session: Session,
}

/// Extractor that requires a signed-in user
pub struct RequireUser {
    pub user: User,
    pub session: Session,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthenticated,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthenticated => views::error_page(
                StatusCode::UNAUTHORIZED,
                "Please log in to access this page.",
            ),
            AuthError::InternalError => {
                views::error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentPrincipal {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let (principal, session) = extract_principal(parts, state).await?;
        Ok(CurrentPrincipal { principal, session })
    }
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let (principal, session) = extract_principal(parts, state).await?;

        match principal {
            Principal::User(user) => Ok(RequireUser { user, session }),
            Principal::Anonymous => Err(AuthError::Unauthenticated),
        }
    }
}

async fn extract_principal(
    parts: &mut Parts,
    state: &Arc<AppState>,
) -> Result<(Principal, Session), AuthError> {
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| {
            tracing::error!("Session layer unavailable: {msg}");
            AuthError::InternalError
        })?;

    let user_id = session_user_id(&session).await.map_err(|e| {
        tracing::error!("Failed to read session: {e}");
        AuthError::InternalError
    })?;

    let principal = resolve(state.store.as_ref(), user_id).map_err(|e| {
        tracing::error!("Failed to resolve session user: {e}");
        AuthError::InternalError
    })?;

    Ok((principal, session))
}
