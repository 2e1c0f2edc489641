mod app;
mod auth;
mod config;
mod db;
mod error;
mod properties;
mod state;
#[cfg(test)]
mod test_support;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "estate=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.require_auth_for_writes {
        tracing::info!("property writes require authentication");
    }
    let (host, port) = (config.host.clone(), config.port);

    let state = AppState::init(config).await?;
    app::serve(app::build_app(state), &host, port).await
}
