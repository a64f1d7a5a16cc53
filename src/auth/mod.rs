use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod cookie;
pub mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use middleware::{require_session, AuthUser};

/// Routes reachable without a session.
pub fn public_router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Routes that must sit behind [`require_session`].
pub fn protected_router() -> Router<AppState> {
    handlers::me_routes()
}
