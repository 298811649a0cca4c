use askama::Template;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Extension;

use super::{parse_id, render};
use crate::error::AppError;
use crate::sirius::{Context, PermissionSet, Team};
use crate::AppState;

#[derive(Template)]
#[template(path = "team.html")]
pub struct ViewTeamPage {
    prefix: String,
    xsrf_token: String,
    team: Team,
    can_edit: bool,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let team = state.client.team(&ctx, id).await?;

    render(&ViewTeamPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        team,
        can_edit: permissions.has_permission("v1-teams", "put"),
    })
}
