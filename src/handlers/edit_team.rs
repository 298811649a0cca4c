use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{parse_id, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, RefDataTeamType, Team, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "edit-team.html")]
pub struct EditTeamPage {
    prefix: String,
    xsrf_token: String,
    team: Team,
    team_type_options: Vec<RefDataTeamType>,
    success: bool,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct EditTeamForm {
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
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "put")?;
    let id = parse_id(&id)?;

    let team = state.client.team(&ctx, id).await?;
    let team_type_options = state.client.team_types(&ctx).await?;

    render(&EditTeamPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        team,
        team_type_options,
        success: false,
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<EditTeamForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "put")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let mut team = state.client.team(&ctx, id).await?;
    team.display_name = form.name;
    team.phone_number = form.phone;
    team.email = form.email;
    team.type_handle = if form.service == "supervision" {
        form.supervision_type
    } else {
        String::new()
    };

    let team_type_options = state.client.team_types(&ctx).await?;

    match state.client.edit_team(&ctx, &team).await {
        Ok(()) => render(&EditTeamPage {
            prefix: state.prefix.clone(),
            xsrf_token: ctx.xsrf_token,
            team,
            team_type_options,
            success: true,
            errors: ValidationErrors::new(),
        }),
        Err(sirius::Error::Validation(v)) => render_status(
            StatusCode::BAD_REQUEST,
            &EditTeamPage {
                prefix: state.prefix.clone(),
                xsrf_token: ctx.xsrf_token,
                team,
                team_type_options,
                success: false,
                errors: v.errors,
            },
        ),
        Err(err) => Err(err.into()),
    }
}
