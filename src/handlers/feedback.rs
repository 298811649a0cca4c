use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::Form;
use serde::Deserialize;

use super::render;
use crate::error::AppError;
use crate::sirius::{self, Context, FeedbackForm};
use crate::AppState;

#[derive(Template)]
#[template(path = "feedback.html")]
pub struct FeedbackPage {
    prefix: String,
    xsrf_token: String,
    success: bool,
    error_message: String,
    form: FeedbackForm,
}

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackForm {
    #[serde(default, rename = "xsrfToken")]
    xsrf_token: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default, rename = "case-number")]
    case_number: String,
    #[serde(default, rename = "more-detail")]
    more_detail: String,
}

pub async fn get(State(state): State<AppState>, ctx: Context) -> Result<Response, AppError> {
    render(&FeedbackPage {
        prefix: state.prefix.clone(),
        xsrf_token: ctx.xsrf_token,
        success: false,
        error_message: String::new(),
        form: FeedbackForm::default(),
    })
}

pub async fn post(
    State(state): State<AppState>,
    ctx: Context,
    Form(form): Form<SubmitFeedbackForm>,
) -> Result<Response, AppError> {
    let ctx = ctx.with_xsrf_token(form.xsrf_token);

    let feedback = FeedbackForm {
        is_supervision_feedback: true,
        name: form.name,
        email: form.email,
        case_number: form.case_number,
        message: form.more_detail,
    };

    match state.client.add_feedback(&ctx, &feedback).await {
        Ok(()) => render(&FeedbackPage {
            prefix: state.prefix.clone(),
            xsrf_token: ctx.xsrf_token,
            success: true,
            error_message: String::new(),
            form: FeedbackForm::default(),
        }),
        Err(sirius::Error::Validation(v)) => render(&FeedbackPage {
            prefix: state.prefix.clone(),
            xsrf_token: ctx.xsrf_token,
            success: false,
            error_message: v.to_string(),
            form: feedback,
        }),
        Err(err) => Err(err.into()),
    }
}
