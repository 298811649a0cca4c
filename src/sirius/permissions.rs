use std::collections::BTreeMap;

use axum::http::{Method, StatusCode};
use serde::Deserialize;

use super::{Client, Context, Error};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PermissionGroup {
    pub permissions: Vec<String>,
}

/// The caller's permissions, keyed by permission group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(pub BTreeMap<String, PermissionGroup>);

impl PermissionSet {
    /// Method comparison is case-insensitive; the backend reports verbs
    /// in varying casing.
    pub fn has_permission(&self, group: &str, method: &str) -> bool {
        self.0
            .get(group)
            .map(|g| g.permissions.iter().any(|p| p.eq_ignore_ascii_case(method)))
            .unwrap_or(false)
    }
}

impl Client {
    pub async fn my_permissions(&self, ctx: &Context) -> Result<PermissionSet, Error> {
        let resp = self
            .request(ctx, Method::GET, "/api/v1/permissions")?
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::OK => Ok(resp.json().await?),
            _ => Err(Error::status(Method::GET, &resp)),
        }
    }
}
