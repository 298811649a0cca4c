use std::collections::BTreeSet;

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{parse_id, redirect, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, Team, TeamMember, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "remove-team-member.html")]
pub struct RemoveTeamMemberPage {
    prefix: String,
    xsrf_token: String,
    team: Team,
    selected: Vec<TeamMember>,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct RemoveTeamMemberForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default, rename = "selected[]")]
    selected: Vec<i32>,
    #[serde(default)]
    confirm: String,
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<RemoveTeamMemberForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "put")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let mut team = state.client.team(&ctx, id).await?;
    let selected_ids: BTreeSet<i32> = form.selected.iter().copied().collect();

    if form.confirm.is_empty() {
        let selected: Vec<TeamMember> = team
            .members
            .iter()
            .filter(|m| selected_ids.contains(&m.id))
            .cloned()
            .collect();

        return render(&RemoveTeamMemberPage {
            prefix: state.prefix.clone(),
            xsrf_token: ctx.xsrf_token,
            team,
            selected,
            errors: ValidationErrors::new(),
        });
    }

    team.members.retain(|m| !selected_ids.contains(&m.id));

    match state.client.edit_team(&ctx, &team).await {
        Ok(()) => Ok(redirect(&state, &format!("/teams/{id}"))),
        Err(sirius::Error::Validation(v)) => {
            let errors = v.errors;

            let team = state.client.team(&ctx, id).await?;
            let selected: Vec<TeamMember> = team
                .members
                .iter()
                .filter(|m| selected_ids.contains(&m.id))
                .cloned()
                .collect();

            render_status(
                StatusCode::BAD_REQUEST,
                &RemoveTeamMemberPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    team,
                    selected,
                    errors,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
