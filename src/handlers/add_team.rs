use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{redirect, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, RefDataTeamType, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "add-team.html")]
pub struct AddTeamPage {
    prefix: String,
    xsrf_token: String,
    team_types: Vec<RefDataTeamType>,
    name: String,
    service: String,
    team_type: String,
    phone: String,
    email: String,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    service: String,
    #[serde(default, rename = "supervision-type")]
    supervision_type: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "post")?;

    let team_types = state.client.team_types(&ctx).await?;

    render(&AddTeamPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        team_types,
        name: String::new(),
        service: "supervision".to_string(),
        team_type: String::new(),
        phone: String::new(),
        email: String::new(),
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Form(form): Form<AddTeamForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "post")?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    // An LPA team has no supervision team type.
    let team_type = if form.service == "lpa" {
        String::new()
    } else {
        form.supervision_type
    };

    let result = state
        .client
        .add_team(&ctx, &form.name, &team_type, &form.phone, &form.email)
        .await;

    match result {
        Ok(id) => Ok(redirect(&state, &format!("/teams/{id}"))),
        Err(sirius::Error::Validation(v)) => {
            let team_types = state.client.team_types(&ctx).await?;
            render_status(
                StatusCode::BAD_REQUEST,
                &AddTeamPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    team_types,
                    name: form.name,
                    service: form.service,
                    team_type,
                    phone: form.phone,
                    email: form.email,
                    errors: v.errors,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
