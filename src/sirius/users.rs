use std::fmt;

use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Active,
    Locked,
    Suspended,
}

impl UserStatus {
    /// CSS modifier for the status tag in list views.
    pub fn tag_colour(&self) -> &'static str {
        match self {
            UserStatus::Suspended => "govuk-tag--grey",
            UserStatus::Locked => "govuk-tag--orange",
            UserStatus::Active => "",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserStatus::Active => "Active",
            UserStatus::Locked => "Locked",
            UserStatus::Suspended => "Suspended",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: i32,
    pub display_name: String,
    pub surname: String,
    pub email: String,
    pub status: UserStatus,
    /// Display name of the user's first team, where the endpoint
    /// reports team membership.
    pub team: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUser {
    id: i32,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    suspended: bool,
    #[serde(default)]
    teams: Vec<ApiUserTeam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUserTeam {
    #[serde(default)]
    display_name: String,
}

impl ApiUser {
    fn status(&self) -> UserStatus {
        if self.suspended {
            UserStatus::Suspended
        } else if self.locked {
            UserStatus::Locked
        } else {
            UserStatus::Active
        }
    }

    fn into_user(self) -> User {
        let status = self.status();
        let team = self
            .teams
            .first()
            .map(|t| t.display_name.clone())
            .unwrap_or_default();

        User {
            id: self.id,
            display_name: self.display_name,
            surname: self.surname,
            email: self.email,
            status,
            team,
        }
    }
}

impl Client {
    /// All users, sorted by lowercase surname.
    pub async fn list_users(&self, ctx: &Context) -> Result<Vec<User>, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/users")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let mut v: Vec<ApiUser> = resp.json().await?;
                v.sort_by_cached_key(|u| u.surname.to_lowercase());
                Ok(v.into_iter().map(ApiUser::into_user).collect())
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    /// Server-side user search, sorted by surname then display name.
    /// Terms shorter than three characters are rejected locally.
    pub async fn search_users(&self, ctx: &Context, search: &str) -> Result<Vec<User>, Error> {
        if search.chars().count() < 3 {
            return Err(Error::Client(
                "Search term must be at least three characters".to_string(),
            ));
        }

        let path = format!(
            "/api/v1/search/users?includeSuspended=1&query={}",
            percent_encoding::utf8_percent_encode(search, percent_encoding::NON_ALPHANUMERIC)
        );

        let resp = self.request(ctx, Method::GET, &path)?.send().await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let mut v: Vec<ApiUser> = resp.json().await?;
                v.sort_by_cached_key(|u| {
                    (u.surname.to_lowercase(), u.display_name.to_lowercase())
                });
                Ok(v.into_iter().map(ApiUser::into_user).collect())
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }
}
