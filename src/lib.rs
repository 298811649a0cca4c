pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod sirius;

use axum::extract::State;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub client: sirius::Client,
    pub prefix: String,
    pub sirius_public_url: String,
    pub web_dir: String,
}

async fn home(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("{}/my-details", state.prefix))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the application router. Page routes sit behind the
/// permissions and error-page layers; the health check and static
/// assets do not.
pub fn app(state: AppState) -> Router {
    let pages = Router::new()
        .route("/my-details", get(handlers::my_details::get))
        .route(
            "/my-details/edit",
            get(handlers::edit_my_details::get).post(handlers::edit_my_details::post),
        )
        .route(
            "/change-password",
            get(handlers::change_password::get).post(handlers::change_password::post),
        )
        .route("/users", get(handlers::list_users::get))
        .route(
            "/add-user",
            get(handlers::add_user::get).post(handlers::add_user::post),
        )
        .route(
            "/edit-user/:id",
            get(handlers::edit_user::get).post(handlers::edit_user::post),
        )
        .route(
            "/delete-user/:id",
            get(handlers::delete_user::get).post(handlers::delete_user::post),
        )
        .route(
            "/unlock-user/:id",
            get(handlers::unlock_user::get).post(handlers::unlock_user::post),
        )
        .route(
            "/resend-confirmation",
            get(handlers::resend_confirmation::get).post(handlers::resend_confirmation::post),
        )
        .route("/teams", get(handlers::list_teams::get))
        .route(
            "/teams/add",
            get(handlers::add_team::get).post(handlers::add_team::post),
        )
        .route("/teams/:id", get(handlers::view_team::get))
        .route(
            "/teams/edit/:id",
            get(handlers::edit_team::get).post(handlers::edit_team::post),
        )
        .route(
            "/teams/delete/:id",
            get(handlers::delete_team::get).post(handlers::delete_team::post),
        )
        .route(
            "/teams/add-member/:id",
            get(handlers::add_team_member::get).post(handlers::add_team_member::post),
        )
        .route(
            "/teams/remove-member/:id",
            post(handlers::remove_team_member::post),
        )
        .route("/random-reviews", get(handlers::random_reviews::get))
        .route(
            "/random-reviews/edit/:field",
            get(handlers::edit_random_reviews::get).post(handlers::edit_random_reviews::post),
        )
        .route(
            "/supervision/feedback",
            get(handlers::feedback::get).post(handlers::feedback::post),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::permissions::with_permissions,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::error_page::error_page,
        ));

    let web_dir = state.web_dir.clone();
    let static_dir = move |sub: &str| ServeDir::new(format!("{web_dir}/static/{sub}"));

    Router::new()
        .merge(pages)
        .route("/", get(home))
        .route("/health-check", get(health_check))
        .nest_service("/assets", static_dir("assets"))
        .nest_service("/javascript", static_dir("javascript"))
        .nest_service("/stylesheets", static_dir("stylesheets"))
        .layer(from_fn(middleware::security_headers::security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
