use std::collections::{BTreeMap, BTreeSet};

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{parse_id, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, Team, TeamMember, User, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "add-team-member.html")]
pub struct AddTeamMemberPage {
    prefix: String,
    xsrf_token: String,
    team: Team,
    search: String,
    users: Vec<UserRow>,
    success: String,
    errors: ValidationErrors,
}

/// A search result, flagged when the user already belongs to the team.
pub struct UserRow {
    pub user: User,
    pub is_member: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamMemberQuery {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamMemberForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    id: i32,
    #[serde(default)]
    email: String,
    #[serde(default)]
    search: String,
}

fn search_errors(message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.insert(
        "search".to_string(),
        BTreeMap::from([(String::new(), message)]),
    );
    errors
}

async fn run_search(
    state: &AppState,
    ctx: &Context,
    search: &str,
    errors: &mut ValidationErrors,
) -> Result<Vec<User>, AppError> {
    if search.is_empty() {
        return Ok(Vec::new());
    }

    match state.client.search_users(ctx, search).await {
        Ok(users) => Ok(users),
        Err(sirius::Error::Client(message)) => {
            *errors = search_errors(message);
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

fn user_rows(users: Vec<User>, team: &Team) -> Vec<UserRow> {
    let members: BTreeSet<i32> = team.members.iter().map(|m| m.id).collect();

    users
        .into_iter()
        .map(|user| UserRow {
            is_member: members.contains(&user.id),
            user,
        })
        .collect()
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Query(query): Query<AddTeamMemberQuery>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "put")?;
    let id = parse_id(&id)?;

    let team = state.client.team(&ctx, id).await?;

    let mut errors = ValidationErrors::new();
    let users = run_search(&state, &ctx, &query.search, &mut errors).await?;

    render(&AddTeamMemberPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        users: user_rows(users, &team),
        team,
        search: query.search,
        success: String::new(),
        errors,
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<AddTeamMemberForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-teams", "put")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let mut team = state.client.team(&ctx, id).await?;
    team.members.push(TeamMember {
        id: form.id,
        ..Default::default()
    });

    let mut success = String::new();
    let mut errors = ValidationErrors::new();
    let mut status = StatusCode::OK;

    match state.client.edit_team(&ctx, &team).await {
        Ok(()) => success = form.email,
        Err(sirius::Error::Validation(v)) => {
            errors = v.errors;
            status = StatusCode::BAD_REQUEST;
            team = state.client.team(&ctx, id).await?;
        }
        Err(err) => return Err(err.into()),
    }

    let mut search_failure = ValidationErrors::new();
    let users = run_search(&state, &ctx, &form.search, &mut search_failure).await?;
    if errors.is_empty() {
        errors = search_failure;
    }

    render_status(
        status,
        &AddTeamMemberPage {
            prefix: state.prefix.clone(),
            xsrf_token: ctx.xsrf_token,
            users: user_rows(users, &team),
            team,
            search: form.search,
            success,
            errors,
        },
    )
}
