use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::ActivityId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DeleteActivityResponse {
    pub message: String,
}

#[tracing::instrument(skip(state))]
pub async fn delete_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .activity_repository
        .delete(ActivityId::from_uuid(activity_id))
        .await
    {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteActivityResponse {
                message: "Activity deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Activity not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete activity");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete activity".to_string(),
                }),
            )
                .into_response()
        }
    }
}
