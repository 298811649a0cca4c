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
#[template(path = "unlock-user.html")]
pub struct UnlockUserPage {
    prefix: String,
    xsrf_token: String,
    user: AuthUser,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct UnlockUserForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
}

pub async fn get(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "put")?;
    let id = parse_id(&id)?;

    let user = state.client.user(&ctx, id).await?;

    render(&UnlockUserPage {
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
    Form(form): Form<UnlockUserForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "put")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let mut user = state.client.user(&ctx, id).await?;
    user.locked = false;

    match state.client.edit_user(&ctx, &user).await {
        Ok(()) => Ok(redirect(&state, &format!("/edit-user/{id}"))),
        Err(sirius::Error::Client(message)) => {
            let mut errors = ValidationErrors::new();
            errors.insert(
                String::new(),
                BTreeMap::from([(String::new(), message)]),
            );

            render_status(
                StatusCode::BAD_REQUEST,
                &UnlockUserPage {
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
