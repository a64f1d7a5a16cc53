use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::cookie::{extract_cookie, AUTH_COOKIE};
use crate::{error::ApiError, state::AppState};

/// Identity verified by [`require_session`]. Handlers get it only from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Gate for protected routes: no valid `auth_token` cookie, no handler.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_cookie(req.headers(), AUTH_COOKIE) else {
        debug!(uri = %req.uri(), "no session cookie");
        return Err(ApiError::Unauthorized);
    };

    let claims = state.keys.validate(&token).map_err(|e| {
        warn!(reason = %e, uri = %req.uri(), "session token rejected");
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        username: claims.username,
    });
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
