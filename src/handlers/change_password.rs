use askama::Template;
use axum::extract::{Query, State};
use axum::response::Response;
use axum_extra::extract::Form;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::{redirect, render};
use crate::error::AppError;
use crate::sirius::{self, Context};
use crate::AppState;

#[derive(Template)]
#[template(path = "change-password.html")]
pub struct ChangePasswordPage {
    prefix: String,
    xsrf_token: String,
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordQuery {
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    currentpassword: String,
    #[serde(default)]
    password1: String,
    #[serde(default)]
    password2: String,
}

pub async fn get(
    State(state): State<AppState>,
    ctx: Context,
    Query(query): Query<ChangePasswordQuery>,
) -> Result<Response, AppError> {
    render(&ChangePasswordPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        error: query.error,
    })
}

pub async fn post(
    State(state): State<AppState>,
    ctx: Context,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Response, AppError> {
    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    match state
        .client
        .change_password(&ctx, &form.currentpassword, &form.password1, &form.password2)
        .await
    {
        Ok(()) => Ok(redirect(&state, "/my-details")),
        Err(sirius::Error::Unauthorized) => Err(sirius::Error::Unauthorized.into()),
        Err(sirius::Error::Client(message)) => {
            let to = format!(
                "/change-password?error={}",
                utf8_percent_encode(&message, NON_ALPHANUMERIC)
            );
            Ok(redirect(&state, &to))
        }
        Err(err) => {
            tracing::warn!(error = %err, "change password failed");
            Ok(redirect(&state, "/change-password"))
        }
    }
}
