use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{redirect, render, render_status};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "edit-my-details.html")]
pub struct EditMyDetailsPage {
    prefix: String,
    xsrf_token: String,
    phone_number: String,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct EditMyDetailsForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    phonenumber: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
) -> Result<Response, AppError> {
    if !permissions.has_permission("v1-users", "patch") {
        return Ok(redirect(&state, "/my-details"));
    }

    let details = state.client.my_details(&ctx).await?;

    render(&EditMyDetailsPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        phone_number: details.phone_number,
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Form(form): Form<EditMyDetailsForm>,
) -> Result<Response, AppError> {
    if !permissions.has_permission("v1-users", "patch") {
        return Ok(redirect(&state, "/my-details"));
    }

    let ctx = ctx.with_xsrf_token(form.xsrf_token);
    let details = state.client.my_details(&ctx).await?;

    match state
        .client
        .edit_my_details(&ctx, details.id, &form.phonenumber)
        .await
    {
        Ok(()) => Ok(redirect(&state, "/my-details")),
        Err(sirius::Error::Validation(v)) => render_status(
            StatusCode::BAD_REQUEST,
            &EditMyDetailsPage {
                prefix: state.prefix.clone(),
                xsrf_token: ctx.xsrf_token,
                phone_number: form.phonenumber,
                errors: v.errors,
            },
        ),
        Err(err) => Err(err.into()),
    }
}
