use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{error, warn};

/// Used when `JWT_SECRET` is not set. Never meant for production.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Session tokens and the auth cookie live for 72 hours.
pub const SESSION_TTL: Duration = Duration::from_secs(72 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub uses_default_secret: bool,
    pub ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub frontend_dir: PathBuf,
    pub environment: Environment,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("ENVIRONMENT") {
            Some(label) => Environment::parse(&label).unwrap_or_else(|| {
                warn!(environment = %label, "unknown ENVIRONMENT label; assuming development");
                Environment::Development
            }),
            None => Environment::Development,
        };

        let jwt = match get("JWT_SECRET") {
            Some(secret) => JwtConfig {
                secret,
                uses_default_secret: false,
                ttl: SESSION_TTL,
            },
            None => {
                if environment.is_production() {
                    error!("JWT_SECRET not set in production; falling back to the insecure development secret");
                } else {
                    warn!("JWT_SECRET not set, using default dev secret. Set it in .env for production.");
                }
                JwtConfig {
                    secret: DEV_JWT_SECRET.into(),
                    uses_default_secret: true,
                    ttl: SESSION_TTL,
                }
            }
        };

        let port = match get("PORT").or_else(|| get("APP_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid PORT {raw:?}: {e}"))?,
            None => 8080,
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: get("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/soma.db")),
            frontend_dir: get("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./frontend/dist")),
            environment,
            jwt,
        })
    }
}
