//! HTTP client for the Sirius backend.
//!
//! One async method per remote endpoint. Every request forwards the
//! inbound request's cookies and XSRF token, performs a single call and
//! decodes the endpoint's particular success and error body shapes.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, Method, StatusCode};
use axum_extra::extract::cookie::CookieJar;
use percent_encoding::percent_decode_str;
use url::Url;

pub mod feedback;
pub mod my_details;
pub mod password;
pub mod permissions;
pub mod random_reviews;
pub mod ref_data;
pub mod teams;
pub mod user;
pub mod users;

pub use feedback::FeedbackForm;
pub use my_details::MyDetails;
pub use permissions::{PermissionGroup, PermissionSet};
pub use random_reviews::{EditRandomReview, RandomReviews};
pub use ref_data::RefDataTeamType;
pub use teams::{Team, TeamMember};
pub use user::AuthUser;
pub use users::{User, UserStatus};

/// Field errors keyed by field name, then by error code. `BTreeMap`
/// keeps the rendering order of re-displayed form errors stable.
pub type ValidationErrors = BTreeMap<String, BTreeMap<String, String>>;

/// A structured validation failure reported by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationError {
    pub message: String,
    pub errors: ValidationErrors,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "validation failed")
        } else {
            f.write_str(&self.message)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected the session; the caller must log in again.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend returned a status we have no handling for.
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// A single backend-reported message, surfaced inline in the form.
    #[error("{0}")]
    Client(String),

    /// Structured per-field errors, re-rendered into the form.
    #[error("{0}")]
    Validation(ValidationError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    fn status(method: Method, resp: &reqwest::Response) -> Self {
        Error::Status {
            method,
            url: resp.url().to_string(),
            status: resp.status(),
        }
    }
}

/// Per-request state forwarded to the backend: the caller's cookies and
/// their XSRF token.
///
/// On GET requests the token comes from the `XSRF-TOKEN` cookie; form
/// submissions carry it in the `xsrfToken` field instead, which the
/// handler swaps in with [`Context::with_xsrf_token`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub cookies: String,
    pub xsrf_token: String,
}

impl Context {
    pub fn with_xsrf_token(mut self, token: impl Into<String>) -> Self {
        self.xsrf_token = token.into();
        self
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Context {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let jar = CookieJar::from_headers(&parts.headers);
        let xsrf_token = jar
            .get("XSRF-TOKEN")
            .map(|c| percent_decode_str(c.value()).decode_utf8_lossy().into_owned())
            .unwrap_or_default();

        Ok(Context { cookies, xsrf_token })
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build a request against `path`, carrying the forwarded cookies,
    /// the XSRF token and the membrane bypass header.
    fn request(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.base_url.join(path)?;

        let mut req = self
            .http
            .request(method, url)
            .header("OPG-Bypass-Membrane", "1");

        if !ctx.cookies.is_empty() {
            req = req.header(header::COOKIE, &ctx.cookies);
        }
        if !ctx.xsrf_token.is_empty() {
            req = req.header("X-XSRF-TOKEN", &ctx.xsrf_token);
        }

        Ok(req)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::Client;
    use axum::Router;

    /// Serve `router` as a mock backend on an ephemeral port and return
    /// a client pointed at it.
    pub async fn client_for(router: Router) -> Client {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock");
        });

        Client::new(&format!("http://{addr}")).expect("client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn context_reads_xsrf_cookie() {
        let req = axum::http::Request::builder()
            .header(header::COOKIE, "XSRF-TOKEN=abcde%3D%3D; Other=other")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let ctx = Context::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(ctx.xsrf_token, "abcde==");
        assert_eq!(ctx.cookies, "XSRF-TOKEN=abcde%3D%3D; Other=other");
    }

    #[tokio::test]
    async fn context_without_cookies_is_empty() {
        let req = axum::http::Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let ctx = Context::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(ctx.cookies.is_empty());
        assert!(ctx.xsrf_token.is_empty());
    }
}
