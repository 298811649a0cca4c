use askama::Template;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;

use super::render;
use crate::error::AppError;
use crate::sirius::{Context, PermissionSet, Team};
use crate::AppState;

#[derive(Template)]
#[template(path = "teams.html")]
pub struct ListTeamsPage {
    prefix: String,
    search: String,
    teams: Vec<Team>,
    can_add: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListTeamsQuery {
    #[serde(default)]
    search: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Response, AppError> {
    let teams = state.client.teams(&ctx).await?;

    let filtered: Vec<Team> = if query.search.is_empty() {
        teams
    } else {
        let term = query.search.to_lowercase();
        teams
            .into_iter()
            .filter(|t| t.display_name.to_lowercase().contains(&term))
            .collect()
    };

    render(&ListTeamsPage {
        prefix: state.prefix.clone(),
        search: query.search,
        teams: filtered,
        can_add: permissions.has_permission("v1-teams", "post"),
    })
}
