use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error};

#[derive(Debug, Deserialize)]
struct ChangePasswordError {
    #[serde(default)]
    errors: String,
}

impl Client {
    pub async fn change_password(
        &self,
        ctx: &Context,
        existing_password: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::POST, "/auth/change-password")?
            .form(&[
                ("existingPassword", existing_password),
                ("password", password),
                ("confirmPassword", confirm_password),
            ])
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            s if s.is_success() => Ok(()),
            _ => {
                let status = Error::status(Method::POST, &resp);
                match resp.json::<ChangePasswordError>().await {
                    Ok(v) if !v.errors.is_empty() => Err(Error::Client(v.errors)),
                    _ => Err(status),
                }
            }
        }
    }
}
