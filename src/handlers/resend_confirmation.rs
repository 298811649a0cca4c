use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{redirect, render, require};
use crate::error::AppError;
use crate::sirius::{Context, PermissionSet};
use crate::AppState;

#[derive(Template)]
#[template(path = "resend-confirmation.html")]
pub struct ResendConfirmationPage {
    prefix: String,
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendConfirmationForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "put")?;

    Ok(redirect(&state, "/users"))
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Form(form): Form<ResendConfirmationForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "put")?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);
    state.client.resend_confirmation(&ctx, &form.email).await?;

    render(&ResendConfirmationPage {
        prefix: state.prefix.clone(),
        id: form.id,
        email: form.email,
    })
}
