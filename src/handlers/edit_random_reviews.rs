use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{redirect, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, EditRandomReview, PermissionSet, RandomReviews, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "edit-random-reviews.html")]
pub struct EditRandomReviewsPage {
    prefix: String,
    xsrf_token: String,
    field: String,
    label: String,
    input_name: String,
    value: String,
    error: String,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct EditRandomReviewsForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default, rename = "layPercentage")]
    lay_percentage: Option<String>,
    #[serde(default, rename = "paPercentage")]
    pa_percentage: Option<String>,
    #[serde(default, rename = "proPercentage")]
    pro_percentage: Option<String>,
    #[serde(default, rename = "reviewCycle")]
    review_cycle: Option<String>,
}

fn field_label(field: &str) -> Result<(&'static str, &'static str), AppError> {
    match field {
        "lay-percentage" => Ok(("lay percentage", "layPercentage")),
        "pa-percentage" => Ok(("PA percentage", "paPercentage")),
        "pro-percentage" => Ok(("professional percentage", "proPercentage")),
        "review-cycle" => Ok(("review cycle", "reviewCycle")),
        _ => Err(AppError::NotFound),
    }
}

fn current_value(field: &str, settings: &RandomReviews) -> String {
    match field {
        "lay-percentage" => settings.lay_percentage.to_string(),
        "pa-percentage" => settings.pa_percentage.to_string(),
        "pro-percentage" => settings.pro_percentage.to_string(),
        _ => settings.review_cycle.to_string(),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(field): Path<String>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-random-review-settings", "post")?;
    let (label, input_name) = field_label(&field)?;

    let settings = state.client.random_reviews(&ctx).await?;

    render(&EditRandomReviewsPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        value: current_value(&field, &settings),
        field,
        label: label.to_string(),
        input_name: input_name.to_string(),
        error: String::new(),
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(field): Path<String>,
    Form(form): Form<EditRandomReviewsForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-random-review-settings", "post")?;
    let (label, input_name) = field_label(&field)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    // Unsubmitted fields keep their current value.
    let current = state.client.random_reviews(&ctx).await?;
    let edit = EditRandomReview {
        lay_percentage: form
            .lay_percentage
            .unwrap_or_else(|| current.lay_percentage.to_string()),
        pa_percentage: form
            .pa_percentage
            .unwrap_or_else(|| current.pa_percentage.to_string()),
        pro_percentage: form
            .pro_percentage
            .unwrap_or_else(|| current.pro_percentage.to_string()),
        review_cycle: form
            .review_cycle
            .unwrap_or_else(|| current.review_cycle.to_string()),
    };

    match state.client.edit_random_review_settings(&ctx, &edit).await {
        Ok(()) => Ok(redirect(&state, "/random-reviews")),
        Err(sirius::Error::Validation(v)) => render_status(
            StatusCode::BAD_REQUEST,
            &EditRandomReviewsPage {
                prefix: state.prefix.clone(),
                xsrf_token: ctx.xsrf_token,
                value: current_value(&field, &current),
                field,
                label: label.to_string(),
                input_name: input_name.to_string(),
                error: v.message,
                errors: v.errors,
            },
        ),
        Err(err) => Err(err.into()),
    }
}
