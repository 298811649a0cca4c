use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::Extension;

use super::render;
use crate::error::AppError;
use crate::sirius::{Context, PermissionSet};
use crate::AppState;

#[derive(Template)]
#[template(path = "my-details.html")]
pub struct MyDetailsPage {
    prefix: String,
    firstname: String,
    surname: String,
    email: String,
    phone_number: String,
    organisation: String,
    roles: Vec<String>,
    teams: Vec<String>,
    can_edit: bool,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
) -> Result<Response, AppError> {
    let details = state.client.my_details(&ctx).await?;

    let mut organisation = String::new();
    let mut roles = Vec::new();
    for role in details.roles {
        if role == "OPG User" || role == "COP User" {
            organisation = role;
        } else {
            roles.push(role);
        }
    }

    render(&MyDetailsPage {
        prefix: state.prefix.clone(),
        firstname: details.firstname,
        surname: details.surname,
        email: details.email,
        phone_number: details.phone_number,
        organisation,
        roles,
        teams: details.teams.into_iter().map(|t| t.display_name).collect(),
        can_edit: permissions.has_permission("v1-users", "patch"),
    })
}
