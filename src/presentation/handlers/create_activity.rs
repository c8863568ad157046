use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use super::ErrorResponse;
use super::activity_types::ActivityPayload;
use crate::application::services::ActivityServiceError;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn create_activity_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .activity_service
        .generate(RoomId::from_uuid(room_id))
        .await
    {
        Ok(activity) => {
            (StatusCode::CREATED, Json(ActivityPayload::from(activity))).into_response()
        }
        Err(ActivityServiceError::NoContent) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No transcript content found for this room".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Activity generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create activity".to_string(),
                }),
            )
                .into_response()
        }
    }
}
