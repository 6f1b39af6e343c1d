use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::views;
use crate::error::Error;

/// Page error that converts to an HTML error response
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl PageError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<Error> for PageError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound => Self::new(StatusCode::NOT_FOUND, "Not found."),
            Error::Forbidden => Self::new(
                StatusCode::FORBIDDEN,
                "You can only delete your own notes.",
            ),
            Error::Unauthenticated => {
                Self::new(StatusCode::UNAUTHORIZED, "Please log in to access this page.")
            }
            Error::EmptyNote => Self::new(StatusCode::BAD_REQUEST, "Note text cannot be empty."),
            other => {
                tracing::error!("Request failed: {other}");
                Self::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        views::error_page(self.status, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        assert_eq!(PageError::from(Error::Forbidden).status, StatusCode::FORBIDDEN);
        assert_eq!(PageError::from(Error::NotFound).status, StatusCode::NOT_FOUND);
        assert_eq!(
            PageError::from(Error::Unauthenticated).status,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_infrastructure_errors_hide_details() {
        let err = PageError::from(Error::Config("secret path".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secret"));
    }
}
