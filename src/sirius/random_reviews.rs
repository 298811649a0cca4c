use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{Client, Context, Error, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomReviews {
    #[serde(default)]
    pub lay_percentage: i32,
    #[serde(default)]
    pub pa_percentage: i32,
    #[serde(default)]
    pub pro_percentage: i32,
    #[serde(default)]
    pub review_cycle: i32,
}

/// Settings write payload. Values stay as strings so the backend does
/// the validation and can report per-field messages.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRandomReview {
    pub lay_percentage: String,
    pub pa_percentage: String,
    pub pro_percentage: String,
    pub review_cycle: String,
}

#[derive(Debug, Deserialize)]
struct EditRandomReviewError {
    #[serde(default)]
    detail: String,
    #[serde(default)]
    validation_errors: ValidationErrors,
}

impl Client {
    pub async fn random_reviews(&self, ctx: &Context) -> Result<RandomReviews, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/random-review-settings")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(resp.json().await?),
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    pub async fn edit_random_review_settings(
        &self,
        ctx: &Context,
        settings: &EditRandomReview,
    ) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::POST, "/api/v1/random-review-settings")?
            .json(settings)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => {
                let status = Error::status(Method::POST, &resp);
                match resp.json::<EditRandomReviewError>().await {
                    Ok(v) => Err(Error::Validation(ValidationError {
                        message: v.detail,
                        errors: v.validation_errors,
                    })),
                    Err(_) => Err(status),
                }
            }
        }
    }
}
