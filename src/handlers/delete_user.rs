use std::collections::BTreeMap;

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{parse_id, redirect, render, render_status, require};
use crate::error::AppError;
use crate::sirius::{self, AuthUser, Context, PermissionSet, ValidationErrors};
use crate::AppState;

#[derive(Template)]
#[template(path = "delete-user.html")]
pub struct DeleteUserPage {
    prefix: String,
    xsrf_token: String,
    user: AuthUser,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "delete")?;
    let id = parse_id(&id)?;

    let user = state.client.user(&ctx, id).await?;

    render(&DeleteUserPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        user,
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<DeleteUserForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "delete")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    match state.client.delete_user(&ctx, id).await {
        Ok(()) => Ok(redirect(&state, "/users")),
        Err(sirius::Error::Client(message)) => {
            let user = state.client.user(&ctx, id).await?;

            let mut errors = ValidationErrors::new();
            errors.insert(
                String::new(),
                BTreeMap::from([(String::new(), message)]),
            );

            render_status(
                StatusCode::BAD_REQUEST,
                &DeleteUserPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    user,
                    errors,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
