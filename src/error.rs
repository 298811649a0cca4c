use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::sirius;

/// Failures a page handler can produce.
///
/// Conversion into a user-facing response happens in the outermost
/// [`crate::middleware::error_page`] layer, which needs the original
/// error plus request state; `into_response` therefore only sets the
/// status and stashes the error in the response extensions for that
/// layer to pick up.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Sirius(#[from] sirius::Error),

    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("could not render template: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Sirius(sirius::Error::Unauthorized) => StatusCode::UNAUTHORIZED,
            AppError::Sirius(sirius::Error::Status { status, .. })
                if *status == StatusCode::FORBIDDEN || *status == StatusCode::NOT_FOUND =>
            {
                *status
            }
            AppError::Sirius(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}
