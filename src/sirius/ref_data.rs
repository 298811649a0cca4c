use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RefDataTeamType {
    pub handle: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamTypesResponse {
    #[serde(default)]
    team_type: Vec<RefDataTeamType>,
}

impl Client {
    pub async fn team_types(&self, ctx: &Context) -> Result<Vec<RefDataTeamType>, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/reference-data?filter=teamType")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let v: TeamTypesResponse = resp.json().await?;
                Ok(v.team_type)
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }

    /// Assignable roles, sorted, with the organisation pseudo-roles
    /// filtered out.
    pub async fn roles(&self, ctx: &Context) -> Result<Vec<String>, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/roles")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => {
                let v: Vec<String> = resp.json().await?;
                let mut roles: Vec<String> = v
                    .into_iter()
                    .filter(|role| role != "COP User" && role != "OPG User")
                    .collect();
                roles.sort();
                Ok(roles)
            }
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::client_for;
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn team_types_unwraps_reference_data() {
        let client = client_for(Router::new().route(
            "/api/v1/reference-data",
            get(|| async {
                Json(json!({
                    "teamType": [
                        {"handle": "INVESTIGATIONS", "label": "Investigations"},
                        {"handle": "FINANCE", "label": "Finance"},
                    ]
                }))
            }),
        ))
        .await;

        let types = client.team_types(&Context::default()).await.unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].handle, "INVESTIGATIONS");
    }

    #[tokio::test]
    async fn roles_filters_organisations_and_sorts() {
        let client = client_for(Router::new().route(
            "/api/v1/roles",
            get(|| async {
                Json(json!(["System Admin", "OPG User", "Manager", "COP User"]))
            }),
        ))
        .await;

        let roles = client.roles(&Context::default()).await.unwrap();
        assert_eq!(roles, vec!["Manager".to_string(), "System Admin".to_string()]);
    }
}
