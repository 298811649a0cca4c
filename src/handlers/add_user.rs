use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, Context, PermissionSet, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "add-user.html")]
pub struct AddUserPage {
    prefix: String,
    xsrf_token: String,
    roles: Vec<String>,
    success: bool,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    organisation: String,
    #[serde(default)]
    roles: Vec<String>,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "post")?;

    let roles = state.client.roles(&ctx).await?;

    render(&AddUserPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        roles,
        success: false,
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Form(form): Form<AddUserForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "post")?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let result = state
        .client
        .add_user(
            &ctx,
            &form.email,
            &form.firstname,
            &form.surname,
            &form.organisation,
            &form.roles,
        )
        .await;

    match result {
        Ok(()) => {
            let roles = state.client.roles(&ctx).await?;
            render(&AddUserPage {
                prefix: state.prefix.clone(),
                xsrf_token: ctx.xsrf_token,
                roles,
                success: true,
                errors: ValidationErrors::new(),
            })
        }
        Err(sirius::Error::Validation(v)) => {
            let roles = state.client.roles(&ctx).await?;
            render_status(
                StatusCode::BAD_REQUEST,
                &AddUserPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    roles,
                    success: false,
                    errors: v.errors,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
