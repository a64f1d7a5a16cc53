use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::MeasurementInput,
    repo::{self, Measurement},
};
use crate::{
    auth::{dto::MessageResponse, AuthUser},
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Needs the session layer.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/measurements", get(list_measurements).post(create_measurement))
        .route(
            "/measurements/:id",
            put(update_measurement).delete(delete_measurement),
        )
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn list_measurements(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Measurement>>> {
    let rows = repo::list_by_user(&state.db, user.id)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(rows))
}

/// The owner is always the session user, whatever the body says.
#[instrument(skip_all, fields(user_id = user.id))]
pub async fn create_measurement(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> ApiResult<Json<Measurement>> {
    let Json(input) = payload?;
    input.validate()?;
    let created = repo::create(&state.db, user.id, &input)
        .await
        .map_err(ApiError::internal)?;
    info!(id = created.id, "measurement created");
    Ok(Json(created))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn update_measurement(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> ApiResult<Json<Measurement>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    match repo::update(&state.db, user.id, id, &input)
        .await
        .map_err(ApiError::internal)?
    {
        Some(updated) => Ok(Json(updated)),
        None => {
            warn!(id, "update of missing or foreign measurement");
            Err(ApiError::NotFound)
        }
    }
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let deleted = repo::delete(&state.db, user.id, id)
        .await
        .map_err(|e| ApiError::internal_with("Error deleting", e))?;
    if !deleted {
        warn!(id, "delete of missing or foreign measurement");
        return Err(ApiError::NotFound);
    }
    info!(id, "measurement deleted");
    Ok(Json(MessageResponse { message: "Deleted" }))
}
