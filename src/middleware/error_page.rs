use std::sync::Arc;

use askama::Template;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::AppError;
use crate::sirius;
use crate::AppState;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    prefix: String,
    code: u16,
    error: String,
}

/// Outermost page layer: translates an [`AppError`] left in the
/// response extensions into what the user actually sees.
///
/// An expired session redirects into the Sirius login flow with the
/// original path as the return target. Forbidden and not-found keep
/// their status; everything else is logged and rendered as a 500 error
/// page.
pub async fn error_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(err) = response.extensions().get::<Arc<AppError>>().cloned() else {
        return response;
    };

    if let AppError::Sirius(sirius::Error::Unauthorized) = err.as_ref() {
        let target = format!("{}{}", state.prefix, path);
        let login = format!(
            "{}/auth?redirect={}",
            state.sirius_public_url,
            utf8_percent_encode(&target, NON_ALPHANUMERIC)
        );
        return Redirect::to(&login).into_response();
    }

    let code = match err.status_code() {
        s @ (StatusCode::FORBIDDEN | StatusCode::NOT_FOUND) => s,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if code == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, %path, "request failed");
    }

    let page = ErrorPage {
        prefix: state.prefix.clone(),
        code: code.as_u16(),
        error: err.to_string(),
    };

    match page.render() {
        Ok(html) => (code, Html(html)).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, "could not render error page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not render error page",
            )
                .into_response()
        }
    }
}
