use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        cookie::{header_value, SessionCookie},
        dto::{Credentials, LoginResponse, MessageResponse, PublicUser},
        middleware::AuthUser,
        services,
    },
    error::ApiResult,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Needs the session layer.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn session_cookie(state: &AppState) -> SessionCookie {
    SessionCookie::new(state.config.environment.is_production(), state.keys.ttl())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    services::register(&state.db, &payload.username, &payload.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let session = services::login(&state.db, &state.keys, &payload.username, &payload.password).await?;
    let cookie = header_value(&session_cookie(&state).issue(&session.token))?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Logged in",
            username: session.user.username,
        }),
    ))
}

/// Tokens are not tracked server-side; logout only drops the cookie.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let cookie = header_value(&session_cookie(&state).clear())?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn get_me(user: AuthUser) -> Json<PublicUser> {
    Json(PublicUser {
        username: user.username,
    })
}

#[cfg(test)]
mod me_tests {
    use super::*;

    #[test]
    fn me_response_serialization() {
        let response = PublicUser {
            username: "anna".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "username": "anna" }));
    }
}
