mod common;

use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::json;

use common::{grant_permissions, http, start_app};

fn user_directory() -> Router {
    Router::new().route(
        "/api/v1/users",
        get(|| async {
            Json(json!([
                {"id": 1, "displayName": "Bruce Banner", "surname": "Banner",
                 "email": "bb@example.com", "suspended": true},
                {"id": 2, "displayName": "Tony Stark", "surname": "Stark",
                 "email": "ts@example.com", "teams": [{"displayName": "Avengers"}]},
                {"id": 3, "displayName": "Carol Danvers", "surname": "Danvers",
                 "email": "cd@example.com", "locked": true},
            ]))
        }),
    )
}

fn auth_user() -> Router {
    Router::new().route(
        "/auth/user/:id",
        get(|| async {
            Json(json!({
                "id": 47,
                "displayName": "John Smith",
                "firstname": "John",
                "surname": "Smith",
                "email": "js@example.com",
                "roles": ["OPG User", "Manager"],
                "locked": true,
                "suspended": false,
            }))
        }),
    )
}

fn roles() -> Router {
    Router::new().route(
        "/api/v1/roles",
        get(|| async { Json(json!(["System Admin", "OPG User", "Manager", "COP User"])) }),
    )
}

#[tokio::test]
async fn users_are_listed_sorted_by_surname() {
    let app = start_app(grant_permissions(&[]).merge(user_directory())).await;

    let resp = http()
        .get(format!("{}/users", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    let banner = body.find("Bruce Banner").unwrap();
    let danvers = body.find("Carol Danvers").unwrap();
    let stark = body.find("Tony Stark").unwrap();
    assert!(banner < danvers && danvers < stark);

    assert!(body.contains("Suspended"));
    assert!(body.contains("Locked"));
    assert!(body.contains("Avengers"));
}

#[tokio::test]
async fn users_can_be_filtered_by_search_term() {
    let app = start_app(grant_permissions(&[]).merge(user_directory())).await;

    let resp = http()
        .get(format!("{}/users?search=stark", app.base_url))
        .send()
        .await
        .unwrap();

    let body = resp.text().await.unwrap();
    assert!(body.contains("Tony Stark"));
    assert!(!body.contains("Bruce Banner"));
}

fn large_directory(count: usize) -> Router {
    Router::new().route(
        "/api/v1/users",
        get(move || async move {
            let users: Vec<serde_json::Value> = (1..=count)
                .map(|i| {
                    json!({
                        "id": i,
                        "displayName": format!("User {i}"),
                        "surname": format!("Surname{i:03}"),
                        "email": format!("user{i}@example.com"),
                    })
                })
                .collect();
            Json(json!(users))
        }),
    )
}

#[tokio::test]
async fn non_numeric_page_falls_back_to_the_first_page() {
    let app = start_app(grant_permissions(&[]).merge(user_directory())).await;

    let resp = http()
        .get(format!("{}/users?page=abc", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Bruce Banner"));
}

#[tokio::test]
async fn exactly_full_page_has_no_next_link() {
    let app = start_app(grant_permissions(&[]).merge(large_directory(50))).await;

    let resp = http()
        .get(format!("{}/users", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("User 50"));
    assert!(!body.contains("rel=\"next\""));
}

#[tokio::test]
async fn overfull_page_links_to_the_next_page() {
    let app = start_app(grant_permissions(&[]).merge(large_directory(51))).await;

    let resp = http()
        .get(format!("{}/users", app.base_url))
        .send()
        .await
        .unwrap();

    let body = resp.text().await.unwrap();
    assert!(body.contains("rel=\"next\""));
    assert!(body.contains("page=2"));
}

#[tokio::test]
async fn out_of_range_page_is_not_found() {
    let app = start_app(grant_permissions(&[]).merge(user_directory())).await;

    let resp = http()
        .get(format!("{}/users?page=99", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_user_requires_permission() {
    let app = start_app(grant_permissions(&[])).await;

    let resp = http()
        .get(format!("{}/add-user", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn add_user_rerenders_validation_errors() {
    let sirius = grant_permissions(&["v1-users"]).merge(roles()).route(
        "/auth/user",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errorMessages": {"email": {"emailAddressInvalid": "Enter a valid email"}}
                })),
            )
        }),
    );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/add-user", app.base_url))
        .form(&[
            ("xsrfToken", "token"),
            ("email", "not-an-email"),
            ("firstname", "John"),
            ("surname", "Smith"),
            ("organisation", "OPG User"),
            ("roles", "Manager"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("Enter a valid email"));
}

#[tokio::test]
async fn add_user_shows_a_success_banner() {
    let sirius = grant_permissions(&["v1-users"]).merge(roles()).route(
        "/auth/user",
        post(|| async { (StatusCode::CREATED, Json(json!({}))) }),
    );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/add-user", app.base_url))
        .form(&[
            ("xsrfToken", "token"),
            ("email", "js@example.com"),
            ("firstname", "John"),
            ("surname", "Smith"),
            ("organisation", "OPG User"),
            ("roles", "Manager"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("The user has been added"));
    assert!(body.contains("Manager"));
}

#[tokio::test]
async fn edit_user_rerenders_a_backend_conflict() {
    let sirius = grant_permissions(&["v1-users"]).merge(roles()).route(
        "/auth/user/:id",
        put(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Email address already in use"})),
            )
        }),
    );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/edit-user/47", app.base_url))
        .form(&[
            ("xsrfToken", "token"),
            ("email", "js@example.com"),
            ("firstname", "John"),
            ("surname", "Smith"),
            ("organisation", "OPG User"),
            ("roles", "Manager"),
            ("suspended", "No"),
            ("locked", "No"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Email address already in use"));
    assert!(body.contains("System Admin"));
}

#[tokio::test]
async fn edit_user_saves_and_redirects_to_users() {
    let sirius = grant_permissions(&["v1-users"])
        .merge(auth_user())
        .merge(roles())
        .route("/auth/user/:id", put(|| async { Json(json!({})) }));
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/edit-user/47", app.base_url))
        .form(&[
            ("xsrfToken", "token"),
            ("email", "js@example.com"),
            ("firstname", "John"),
            ("surname", "Smith"),
            ("organisation", "OPG User"),
            ("roles", "Manager"),
            ("suspended", "No"),
            ("locked", "Yes"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/users");
}

#[tokio::test]
async fn edit_user_with_bad_id_is_not_found() {
    let app = start_app(grant_permissions(&["v1-users"])).await;

    let resp = http()
        .get(format!("{}/edit-user/not-a-number", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_redirects_to_users() {
    let sirius = grant_permissions(&["v1-users"])
        .merge(auth_user())
        .route("/auth/user/:id", delete(|| async { Json(json!({})) }));
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/delete-user/47", app.base_url))
        .form(&[("xsrfToken", "token")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/users");
}

#[tokio::test]
async fn unlock_user_submits_unlocked_user() {
    let sirius = grant_permissions(&["v1-users"]).merge(auth_user()).route(
        "/auth/user/:id",
        put(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["locked"], false);
            Json(json!({}))
        }),
    );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/unlock-user/47", app.base_url))
        .form(&[("xsrfToken", "token")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/edit-user/47");
}

#[tokio::test]
async fn resend_confirmation_shows_the_sent_email() {
    let sirius = grant_permissions(&["v1-users"]).route(
        "/auth/resend-confirmation",
        post(|| async { StatusCode::OK }),
    );
    let app = start_app(sirius).await;

    let resp = http()
        .post(format!("{}/resend-confirmation", app.base_url))
        .form(&[
            ("xsrfToken", "token"),
            ("id", "47"),
            ("email", "js@example.com"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("js@example.com"));
}
