use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyDetails {
    pub id: i32,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub teams: Vec<MyDetailsTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyDetailsTeam {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct EditMyDetailsError {
    #[serde(default)]
    detail: String,
    #[serde(default)]
    validation_errors: ValidationErrors,
}

impl Client {
    pub async fn my_details(&self, ctx: &Context) -> Result<MyDetails, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/users/current")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(resp.json().await?),
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    pub async fn edit_my_details(
        &self,
        ctx: &Context,
        id: i32,
        phone_number: &str,
    ) -> Result<(), Error> {
        let resp = self
            .request(
                ctx,
                Method::PUT,
                &format!("/api/v1/users/{id}/updateTelephoneNumber"),
            )?
            .json(&serde_json::json!({ "phoneNumber": phone_number }))
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => {
                let status = Error::status(Method::PUT, &resp);
                match resp.json::<EditMyDetailsError>().await {
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
