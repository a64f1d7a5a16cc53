use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{auth::jwt::JwtKeys, config::AppConfig, db};

/// Everything a handler may touch. Built once at startup and injected.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.db_path).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self { db, config, keys }
    }

    /// In-memory store and a fixed secret.
    #[cfg(test)]
    pub async fn fake() -> Self {
        let db = db::memory_pool().await.expect("in-memory pool");
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("test-secret".into()),
            "FRONTEND_DIR" => Some("./frontend-does-not-exist".into()),
            _ => None,
        })
        .expect("test config");
        Self::from_parts(db, Arc::new(config))
    }
}
