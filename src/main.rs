use anyhow::Context as _;
use axum::Router;
use sirius_user_admin::config::config;
use sirius_user_admin::{app, sirius, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config();

    let state = AppState {
        client: sirius::Client::new(&config.sirius_url)?,
        prefix: config.prefix.clone(),
        sirius_public_url: config.sirius_public_url.clone(),
        web_dir: config.web_dir.clone(),
    };

    let router = app(state);
    let router = if config.prefix.is_empty() {
        router
    } else {
        Router::new().nest(&config.prefix, router)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    tracing::info!(%addr, prefix = %config.prefix, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("could not install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
