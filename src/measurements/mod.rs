pub mod dto;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

/// Routes that must sit behind [`crate::auth::require_session`].
pub fn router() -> Router<AppState> {
    handlers::routes()
}
