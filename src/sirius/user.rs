use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{Client, Context, Error, ValidationError, ValidationErrors};

/// A user as managed through the auth endpoints. The backend stores the
/// organisation as the first entry of the roles array; it is split out
/// here and recombined on write.
#[derive(Debug, Clone, Default)]
pub struct AuthUser {
    pub id: i32,
    pub display_name: String,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub organisation: String,
    pub roles: Vec<String>,
    pub locked: bool,
    pub suspended: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUserResponse {
    id: i32,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    suspended: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddUserRequest<'a> {
    firstname: &'a str,
    surname: &'a str,
    email: &'a str,
    roles: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditUserRequest<'a> {
    id: i32,
    firstname: &'a str,
    surname: &'a str,
    email: &'a str,
    roles: Vec<&'a str>,
    locked: bool,
    suspended: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddUserError {
    #[serde(default)]
    error_messages: ValidationErrors,
}

#[derive(Debug, Deserialize)]
struct EditUserError {
    #[serde(default)]
    message: String,
}

impl Client {
    pub async fn user(&self, ctx: &Context, id: i32) -> Result<AuthUser, Error> {
        let resp = self
            .request(ctx, Method::GET, &format!("/auth/user/{id}"))?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let v: AuthUserResponse = resp.json().await?;

                let mut user = AuthUser {
                    id: v.id,
                    display_name: v.display_name,
                    firstname: v.firstname,
                    surname: v.surname,
                    email: v.email,
                    locked: v.locked,
                    suspended: v.suspended,
                    ..Default::default()
                };
                if !v.roles.is_empty() {
                    user.organisation = v.roles[0].clone();
                    user.roles = v.roles[1..].to_vec();
                }

                Ok(user)
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    pub async fn add_user(
        &self,
        ctx: &Context,
        email: &str,
        firstname: &str,
        surname: &str,
        organisation: &str,
        roles: &[String],
    ) -> Result<(), Error> {
        let mut all_roles = vec![organisation];
        all_roles.extend(roles.iter().map(String::as_str));

        let resp = self
            .request(ctx, Method::POST, "/auth/user")?
            .json(&AddUserRequest {
                firstname,
                surname,
                email,
                roles: all_roles,
            })
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::CREATED => Ok(()),
            _ => {
                let method = Method::POST;
                let status = Error::status(method, &resp);
                match resp.json::<AddUserError>().await {
                    Ok(v) => Err(Error::Validation(ValidationError {
                        message: String::new(),
                        errors: v.error_messages,
                    })),
                    Err(_) => Err(status),
                }
            }
        }
    }

    pub async fn edit_user(&self, ctx: &Context, user: &AuthUser) -> Result<(), Error> {
        let mut roles: Vec<&str> = user.roles.iter().map(String::as_str).collect();
        roles.push(&user.organisation);

        let resp = self
            .request(ctx, Method::PUT, &format!("/auth/user/{}", user.id))?
            .json(&EditUserRequest {
                id: user.id,
                firstname: &user.firstname,
                surname: &user.surname,
                email: &user.email,
                roles,
                locked: user.locked,
                suspended: user.suspended,
            })
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => {
                let status = Error::status(Method::PUT, &resp);
                match resp.json::<EditUserError>().await {
                    Ok(v) if !v.message.is_empty() => Err(Error::Client(v.message)),
                    _ => Err(status),
                }
            }
        }
    }

    pub async fn delete_user(&self, ctx: &Context, id: i32) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::DELETE, &format!("/auth/user/{id}"))?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => Err(Error::status(Method::DELETE, &resp)),
        }
    }

    /// Re-sends the account confirmation email for a pending user.
    pub async fn resend_confirmation(&self, ctx: &Context, email: &str) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::POST, "/auth/resend-confirmation")?
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            s if s.is_success() => Ok(()),
            _ => Err(Error::status(Method::POST, &resp)),
        }
    }
}
