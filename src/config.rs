use once_cell::sync::Lazy;
use std::env;

/// Process-wide configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub sirius_url: String,
    pub sirius_public_url: String,
    pub prefix: String,
    pub web_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let sirius_url =
            env::var("SIRIUS_URL").unwrap_or_else(|_| "http://localhost:9001".to_string());

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            sirius_public_url: env::var("SIRIUS_PUBLIC_URL")
                .unwrap_or_else(|_| sirius_url.clone()),
            sirius_url,
            prefix: env::var("PREFIX").unwrap_or_default(),
            web_dir: env::var("WEB_DIR").unwrap_or_else(|_| "web".to_string()),
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Global configuration accessor.
pub fn config() -> &'static AppConfig {
    &CONFIG
}
