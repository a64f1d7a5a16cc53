use std::net::SocketAddr;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod measurements;
mod state;


use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "soma=debug,axum=info,tower_http=info".to_string());
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
    tracing::info!(
        environment = ?config.environment,
        db_path = %config.db_path.display(),
        default_secret = config.jwt.uses_default_secret,
        "starting"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::init(config).await?;

    app::serve(app::build_app(app_state), addr).await
}
