use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Errors surfaced to API clients as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Benutzername existiert bereits")]
    Conflict,

    #[error("Login fehlgeschlagen")]
    AuthFailed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: "Internal server error",
            source: source.into(),
        }
    }

    /// Internal failure with a client-facing message other than the generic one.
    pub fn internal_with(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message,
            source: source.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::AuthFailed | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal { source, .. } = &self {
            error!(error = ?source, "internal error");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected request body");
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected path parameter");
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AuthFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_their_source() {
        let err = ApiError::internal(anyhow::anyhow!("UNIQUE constraint failed: users.username"));
        assert_eq!(err.to_string(), "Internal server error");

        let err = ApiError::internal_with("Error deleting", anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.to_string(), "Error deleting");
    }
}
