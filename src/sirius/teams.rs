use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Default)]
pub struct TeamMember {
    pub id: i32,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct Team {
    pub id: i32,
    pub display_name: String,
    pub phone_number: String,
    pub email: String,
    /// Supervision team type handle, empty for LPA teams.
    pub type_handle: String,
    /// Human-readable service label: `LPA` or `Supervision — {type}`.
    pub type_label: String,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    id: i32,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    members: Vec<ApiTeamMember>,
    team_type: Option<ApiTeamType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeamMember {
    #[serde(default)]
    id: i32,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct ApiTeamType {
    #[serde(default)]
    handle: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct ApiTeamResponse {
    data: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct DeleteTeamError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct TeamWriteError {
    #[serde(default)]
    data: TeamWriteErrorData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamWriteErrorData {
    #[serde(default)]
    error_messages: ValidationErrors,
}

impl From<ApiTeam> for Team {
    fn from(t: ApiTeam) -> Self {
        let (type_handle, type_label) = match &t.team_type {
            Some(tt) => (tt.handle.clone(), format!("Supervision — {}", tt.label)),
            None => (String::new(), "LPA".to_string()),
        };

        Team {
            id: t.id,
            display_name: t.display_name,
            phone_number: t.phone_number,
            email: t.email,
            type_handle,
            type_label,
            members: t
                .members
                .into_iter()
                .map(|m| TeamMember {
                    id: m.id,
                    display_name: m.display_name,
                    email: m.email,
                })
                .collect(),
        }
    }
}

impl Client {
    pub async fn teams(&self, ctx: &Context) -> Result<Vec<Team>, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/teams")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let v: Vec<ApiTeam> = resp.json().await?;
                Ok(v.into_iter().map(Team::from).collect())
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    pub async fn team(&self, ctx: &Context, id: i32) -> Result<Team, Error> {
        let resp = self
            .request(ctx, Method::GET, &format!("/api/v1/teams/{id}"))?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let v: ApiTeamResponse = resp.json().await?;
                Ok(Team::from(v.data))
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    /// Creates a team and returns its id. The write endpoints still
    /// speak form encoding.
    pub async fn add_team(
        &self,
        ctx: &Context,
        name: &str,
        team_type: &str,
        phone: &str,
        email: &str,
    ) -> Result<i32, Error> {
        let mut form = vec![
            ("name".to_string(), name.to_string()),
            ("phone".to_string(), phone.to_string()),
            ("email".to_string(), email.to_string()),
            ("type".to_string(), String::new()),
            ("teamType".to_string(), String::new()),
        ];
        if !team_type.is_empty() {
            form.push(("teamType[handle]".to_string(), team_type.to_string()));
        }

        let resp = self
            .request(ctx, Method::POST, "/api/team")?
            .form(&form)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::CREATED => {
                let v: ApiTeamResponse = resp.json().await?;
                Ok(v.data.id)
            }
            _ => {
                let status = Error::status(Method::POST, &resp);
                match resp.json::<TeamWriteError>().await {
                    Ok(v) => Err(Error::Validation(ValidationError {
                        message: String::new(),
                        errors: v.data.error_messages,
                    })),
                    Err(_) => Err(status),
                }
            }
        }
    }

    pub async fn edit_team(&self, ctx: &Context, team: &Team) -> Result<(), Error> {
        let mut form = vec![
            ("name".to_string(), team.display_name.clone()),
            ("email".to_string(), team.email.clone()),
            ("phoneNumber".to_string(), team.phone_number.clone()),
            ("teamType[handle]".to_string(), team.type_handle.clone()),
        ];
        for (i, member) in team.members.iter().enumerate() {
            form.push((format!("members[{i}][id]"), member.id.to_string()));
        }

        let resp = self
            .request(ctx, Method::PUT, &format!("/api/team/{}", team.id))?
            .form(&form)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(()),
            _ => {
                let status = Error::status(Method::PUT, &resp);
                match resp.json::<TeamWriteError>().await {
                    Ok(v) => Err(Error::Validation(ValidationError {
                        message: String::new(),
                        errors: v.data.error_messages,
                    })),
                    Err(_) => Err(status),
                }
            }
        }
    }

    pub async fn delete_team(&self, ctx: &Context, id: i32) -> Result<(), Error> {
        let resp = self
            .request(ctx, Method::DELETE, &format!("/api/v1/teams/{id}"))?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            s if s.is_success() => Ok(()),
            _ => {
                let status = Error::status(Method::DELETE, &resp);
                match resp.json::<DeleteTeamError>().await {
                    Ok(v) if !v.message.is_empty() => Err(Error::Client(v.message)),
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
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn teams_labels_lpa_and_supervision() {
        let client = client_for(Router::new().route(
            "/api/v1/teams",
            get(|| async {
                Json(json!([
                    {"id": 1, "displayName": "Casework", "members": [{}, {}]},
                    {"id": 2, "displayName": "Reviews", "members": [],
                     "teamType": {"handle": "INVESTIGATIONS", "label": "Investigations"}},
                ]))
            }),
        ))
        .await;

        let teams = client.teams(&Context::default()).await.unwrap();
        assert_eq!(teams[0].type_label, "LPA");
        assert_eq!(teams[0].members.len(), 2);
        assert_eq!(teams[1].type_label, "Supervision — Investigations");
        assert_eq!(teams[1].type_handle, "INVESTIGATIONS");
    }

    #[tokio::test]
    async fn add_team_sends_form_and_returns_id() {
        let client = client_for(Router::new().route(
            "/api/team",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                assert_eq!(form["name"], "New Team");
                assert_eq!(form["teamType[handle]"], "INVESTIGATIONS");
                (
                    StatusCode::CREATED,
                    Json(json!({"data": {"id": 123, "displayName": "New Team"}})),
                )
            }),
        ))
        .await;

        let id = client
            .add_team(
                &Context::default(),
                "New Team",
                "INVESTIGATIONS",
                "01234",
                "team@example.com",
            )
            .await
            .unwrap();
        assert_eq!(id, 123);
    }

    #[tokio::test]
    async fn edit_team_surfaces_nested_validation_errors() {
        let client = client_for(Router::new().route(
            "/api/team/:id",
            axum::routing::put(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "data": {"errorMessages": {"name": {"stringLengthTooLong": "Too long"}}}
                    })),
                )
            }),
        ))
        .await;

        let team = Team {
            id: 35,
            ..Default::default()
        };
        let err = client.edit_team(&Context::default(), &team).await.unwrap_err();
        match err {
            Error::Validation(v) => {
                assert_eq!(v.errors["name"]["stringLengthTooLong"], "Too long");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_team_accepts_no_content() {
        let client = client_for(Router::new().route(
            "/api/v1/teams/:id",
            axum::routing::delete(|| async { StatusCode::NO_CONTENT }),
        ))
        .await;

        client.delete_team(&Context::default(), 461).await.unwrap();
    }

    #[tokio::test]
    async fn delete_team_maps_message_to_client_error() {
        let client = client_for(Router::new().route(
            "/api/v1/teams/:id",
            axum::routing::delete(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Team still has members"})),
                )
            }),
        ))
        .await;

        let err = client.delete_team(&Context::default(), 461).await.unwrap_err();
        assert!(matches!(err, Error::Client(m) if m == "Team still has members"));
    }
}
