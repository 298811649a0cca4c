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
#[template(path = "edit-user.html")]
pub struct EditUserPage {
    prefix: String,
    xsrf_token: String,
    user: AuthUser,
    roles: Vec<String>,
    errors: ValidationErrors,
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    organisation: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    suspended: String,
    #[serde(default)]
    locked: String,
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
    let roles = state.client.roles(&ctx).await?;

    render(&EditUserPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        user,
        roles,
        errors: ValidationErrors::new(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    Extension(permissions): Extension<PermissionSet>,
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<EditUserForm>,
) -> Result<Response, AppError> {
    require(&permissions, "v1-users", "put")?;
    let id = parse_id(&id)?;

    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let user = AuthUser {
        id,
        firstname: form.firstname,
        surname: form.surname,
        email: form.email,
        organisation: form.organisation,
        roles: form.roles,
        suspended: form.suspended == "Yes",
        locked: form.locked == "Yes",
        ..Default::default()
    };

    match state.client.edit_user(&ctx, &user).await {
        Ok(()) => Ok(redirect(&state, "/users")),
        Err(sirius::Error::Client(message)) => {
            let roles = state.client.roles(&ctx).await?;

            let mut errors = ValidationErrors::new();
            errors.insert(
                "email".to_string(),
                BTreeMap::from([(String::new(), message)]),
            );

            render_status(
                StatusCode::BAD_REQUEST,
                &EditUserPage {
                    prefix: state.prefix.clone(),
                    xsrf_token: ctx.xsrf_token,
                    user,
                    roles,
                    errors,
                },
            )
        }
        Err(err) => Err(err.into()),
    }
}
