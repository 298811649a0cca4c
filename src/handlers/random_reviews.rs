use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::Extension;

use super::{render, require};
use crate::error::AppError;
use crate::sirius::{Context, PermissionSet};
use crate::AppState;

#[derive(Template)]
#[template(path = "random-reviews.html")]
pub struct RandomReviewsPage {
    prefix: String,
    lay_percentage: i32,
    pa_percentage: i32,
    pro_percentage: i32,
    review_cycle: i32,
    can_edit: bool,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
) -> Result<Response, AppError> {
    require(&permissions, "v1-random-review-settings", "get")?;

    let settings = state.client.random_reviews(&ctx).await?;

    render(&RandomReviewsPage {
        prefix: state.prefix.clone(),
        lay_percentage: settings.lay_percentage,
        pa_percentage: settings.pa_percentage,
        pro_percentage: settings.pro_percentage,
        review_cycle: settings.review_cycle,
        can_edit: permissions.has_permission("v1-random-review-settings", "post"),
    })
}
