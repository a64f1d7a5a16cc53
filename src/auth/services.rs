//! Registration and login, independent of HTTP.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{jwt::JwtKeys, password, repo_types::User};
use crate::{
    db::is_unique_violation,
    error::{ApiError, ApiResult},
};

/// A successful login: the session token plus the user it belongs to.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub async fn register(db: &SqlitePool, username: &str, plain: &str) -> ApiResult<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("username must not be empty".into()));
    }
    if plain.is_empty() {
        return Err(ApiError::Validation("password must not be empty".into()));
    }

    let plain = plain.to_owned();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .context("hashing task panicked")
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    // The unique index is the only existence check; no read-then-insert race.
    match User::create(db, username, &hash).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user registered");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            warn!(%username, "username already registered");
            Err(ApiError::Conflict)
        }
        Err(e) => Err(ApiError::internal(e)),
    }
}

/// Unknown user and wrong password both end in [`ApiError::AuthFailed`].
pub async fn login(db: &SqlitePool, keys: &JwtKeys, username: &str, plain: &str) -> ApiResult<Session> {
    let username = username.trim();
    let user = User::find_by_username(db, username)
        .await
        .map_err(ApiError::internal)?;

    let plain = plain.to_owned();
    let Some(user) = user else {
        tokio::task::spawn_blocking(move || password::burn_verification(&plain))
            .await
            .map_err(ApiError::internal)?;
        warn!(%username, "login unknown username");
        return Err(ApiError::AuthFailed);
    };

    let hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::AuthFailed);
    }

    let token = keys.issue(user.id, &user.username).map_err(ApiError::internal)?;
    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Session { token, user })
}
