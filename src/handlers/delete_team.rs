use std::collections::BTreeMap;

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{parse_id, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, Team, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "delete-team.html")]
pub struct DeleteTeamPage {
    prefix: String,
    xsrf_token: String,
    team: Team,
    errors: ValidationErrors,
    success_message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTeamForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "delete")?;
    let id = parse_id(&id)?;

    let team = state.client.team(&ctx, id).await?;

    render(&DeleteTeamPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        team,
        errors: ValidationErrors::new(),
        success_message: String::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<DeleteTeamForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "delete")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);
    let team = state.client.team(&ctx, id).await?;

    match state.client.delete_team(&ctx, id).await {
        Ok(()) => {
            let success_message = format!("The team \"{}\" was deleted.", team.display_name);

            render(&DeleteTeamPage {
                prefix: state.prefix.clone(),
                xsrf_token: ctx.xsrf_token,
                team,
                errors: ValidationErrors::new(),
                success_message,
            })
        }
        Err(sirius::Error::Client(message)) => {
            let mut errors = ValidationErrors::new();
            errors.insert(
                String::new(),
                BTreeMap::from([(String::new(), message)]),
            );

            render_status(
                StatusCode::BAD_REQUEST,
                &DeleteTeamPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    team,
                    errors,
                    success_message: String::new(),
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
