mod common;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use common::{grant_permissions, http, start_app};

fn settings() -> Router {
    Router::new().route(
        "/api/v1/random-review-settings",
        get(|| async {
            Json(json!({
                "layPercentage": 10,
                "paPercentage": 20,
                "proPercentage": 30,
                "reviewCycle": 3,
            }))
        }),
    )
}

#[tokio::test]
async fn random_reviews_requires_permission() {
    let app = start_app(grant_permissions(&[]).merge(settings())).await;

    let resp = http()
        .get(format!("{}/random-reviews", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn random_reviews_shows_the_settings() {
    let app = start_app(
        grant_permissions(&["v1-random-review-settings"]).merge(settings()),
    )
    .await;

    let resp = http()
        .get(format!("{}/random-reviews", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("10%"));
    assert!(body.contains("20%"));
    assert!(body.contains("30%"));
    assert!(body.contains("/random-reviews/edit/lay-percentage"));
}

#[tokio::test]
async fn edit_unknown_setting_is_not_found() {
    let app = start_app(
        grant_permissions(&["v1-random-review-settings"]).merge(settings()),
    )
    .await;

    let resp = http()
        .get(format!("{}/random-reviews/edit/unknown", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_setting_merges_unchanged_values() {
    let sirius = grant_permissions(&["v1-random-review-settings"])
        .merge(settings())
        .route(
            "/api/v1/random-review-settings",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["layPercentage"], "40");
                assert_eq!(body["paPercentage"], "20");
                assert_eq!(body["proPercentage"], "30");
                assert_eq!(body["reviewCycle"], "3");
                Json(json!({}))
            }),
        );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!(
            "{}/random-reviews/edit/lay-percentage",
            app.base_url
        ))
        .form(&[("xsrfToken", "token"), ("layPercentage", "40")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/random-reviews");
}

#[tokio::test]
async fn edit_setting_rerenders_validation_errors() {
    let sirius = grant_permissions(&["v1-random-review-settings"])
        .merge(settings())
        .route(
            "/api/v1/random-review-settings",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "detail": "Payload failed validation",
                        "validation_errors": {
                            "layPercentage": {"notBetween": "Must be between 0 and 100"}
                        }
                    })),
                )
            }),
        );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!(
            "{}/random-reviews/edit/lay-percentage",
            app.base_url
        ))
        .form(&[("xsrfToken", "token"), ("layPercentage", "200")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Must be between 0 and 100"));
    assert!(body.contains("Payload failed validation"));
}
