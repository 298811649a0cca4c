//! Page handlers. Each module serves one page and follows the same
//! shape: check permission, parse the request, call the Sirius client,
//! map the result to a template render or redirect.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::sirius::PermissionSet;
use crate::AppState;

pub mod add_team;
pub mod add_team_member;
pub mod add_user;
pub mod change_password;
pub mod delete_team;
pub mod delete_user;
pub mod edit_my_details;
pub mod edit_random_reviews;
pub mod edit_team;
pub mod edit_user;
pub mod feedback;
pub mod list_teams;
pub mod list_users;
pub mod my_details;
pub mod random_reviews;
pub mod remove_team_member;
pub mod resend_confirmation;
pub mod unlock_user;
pub mod view_team;

pub(crate) fn render<T: Template>(page: &T) -> Result<Response, AppError> {
    Ok(Html(page.render()?).into_response())
}

pub(crate) fn render_status<T: Template>(
    status: StatusCode,
    page: &T,
) -> Result<Response, AppError> {
    Ok((status, Html(page.render()?)).into_response())
}

/// Redirect within the application, honouring the serving prefix.
pub(crate) fn redirect(state: &AppState, to: &str) -> Response {
    Redirect::to(&format!("{}{}", state.prefix, to)).into_response()
}

pub(crate) fn require(
    permissions: &PermissionSet,
    group: &str,
    method: &str,
) -> Result<(), AppError> {
    if permissions.has_permission(group, method) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Numeric path segments that fail to parse are treated as unknown
/// pages, not bad requests.
pub(crate) fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}
