use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{Client, Context, Error, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    pub is_supervision_feedback: bool,
    pub name: String,
    pub email: String,
    pub case_number: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct FeedbackError {
    #[serde(default)]
    validation_errors: ValidationErrors,
}

impl Client {
    pub async fn add_feedback(&self, ctx: &Context, form: &FeedbackForm) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::POST, "/api/supervision-feedback")?
            .json(form)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => {
                let status = Error::status(Method::POST, &resp);
                match resp.json::<FeedbackError>().await {
                    Ok(v) if !v.validation_errors.is_empty() => {
                        Err(Error::Validation(ValidationError {
                            message: String::new(),
                            errors: v.validation_errors,
                        }))
                    }
                    _ => Err(status),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::client_for;
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn add_feedback_posts_supervision_flag() {
        let client = client_for(Router::new().route(
            "/api/supervision-feedback",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["isSupervisionFeedback"], true);
                assert_eq!(body["caseNumber"], "700000001");
                Json(json!({}))
            }),
        ))
        .await;

        client
            .add_feedback(
                &Context::default(),
                &FeedbackForm {
                    is_supervision_feedback: true,
                    name: "A User".to_string(),
                    email: "au@example.com".to_string(),
                    case_number: "700000001".to_string(),
                    message: "Feedback".to_string(),
                },
            )
            .await
            .unwrap();
    }
}
