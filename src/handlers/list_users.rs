use askama::Template;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use super::render;
use crate::error::AppError;
use crate::sirius::{Context, User};
use crate::AppState;

const PAGE_SIZE: usize = 50;

#[derive(Template)]
#[template(path = "users.html")]
pub struct ListUsersPage {
    prefix: String,
    users: Vec<User>,
    search: String,
    page_prev: usize,
    page_next: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    search: String,
    /// Kept as a string so junk values fall back to page 1 instead of
    /// rejecting the request.
    #[serde(default)]
    page: String,
}

fn prepare_search_term(term: &str) -> String {
    term.to_lowercase().replace(' ', "")
}

pub async fn get(
    State(state): State<AppState>,
    ctx: Context,
    Query(query): Query<ListUsersQuery>,
) -> Result<Response, AppError> {
    let users = state.client.list_users(&ctx).await?;

    let filtered: Vec<User> = if query.search.is_empty() {
        users
    } else {
        let term = prepare_search_term(&query.search);
        users
            .into_iter()
            .filter(|u| {
                prepare_search_term(&u.display_name).contains(&term)
                    || prepare_search_term(&u.email).contains(&term)
                    || prepare_search_term(&u.status.to_string()).contains(&term)
            })
            .collect()
    };

    let page = query.page.parse::<usize>().unwrap_or(1).max(1);
    let page_start = (page - 1) * PAGE_SIZE;
    if page_start > filtered.len() {
        return Err(AppError::NotFound);
    }
    let page_end = (page_start + PAGE_SIZE).min(filtered.len());

    let page_prev = if page > 1 { page - 1 } else { 0 };
    let page_next = if page * PAGE_SIZE >= filtered.len() {
        0
    } else {
        page + 1
    };

    render(&ListUsersPage {
        prefix: state.prefix.clone(),
        users: filtered[page_start..page_end].to_vec(),
        search: query.search,
        page_prev,
        page_next,
    })
}
