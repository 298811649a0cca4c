use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::sirius::Context;
use crate::AppState;

/// Fetches the caller's permissions from Sirius on every page request
/// and stores them in the request extensions, where handlers pick them
/// up via `Extension<PermissionSet>`.
///
/// A failure here (including an expired session) short-circuits into
/// the error-page layer before the handler runs.
pub async fn with_permissions(
    State(state): State<AppState>,
    ctx: Context,
    mut request: Request,
    next: Next,
) -> Response {
    match state.client.my_permissions(&ctx).await {
        Ok(permissions) => {
            request.extensions_mut().insert(permissions);
            next.run(request).await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
