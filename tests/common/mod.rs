use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use sirius_user_admin::{app, sirius, AppState};

pub struct TestApp {
    pub base_url: String,
    pub sirius_url: String,
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    format!("http://{addr}")
}

/// Start the application against `sirius_router` as the mock backend.
pub async fn start_app(sirius_router: Router) -> TestApp {
    let sirius_url = serve(sirius_router).await;

    let state = AppState {
        client: sirius::Client::new(&sirius_url).expect("client"),
        prefix: String::new(),
        sirius_public_url: sirius_url.clone(),
        web_dir: "web".to_string(),
    };

    TestApp {
        base_url: serve(app(state)).await,
        sirius_url,
    }
}

/// HTTP client with redirects disabled, so tests can assert on
/// Location headers.
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("http client")
}

/// Mock route granting the given permission groups every method.
pub fn grant_permissions(groups: &[&str]) -> Router {
    let body: Value = groups
        .iter()
        .map(|g| {
            (
                g.to_string(),
                json!({"permissions": ["GET", "POST", "PUT", "PATCH", "DELETE"]}),
            )
        })
        .collect::<serde_json::Map<String, Value>>()
        .into();

    Router::new().route(
        "/api/v1/permissions",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    )
}
