use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DeleteRoomResponse {
    pub message: String,
}

#[tracing::instrument(skip(state))]
pub async fn delete_room_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.room_repository.delete(RoomId::from_uuid(room_id)).await {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteRoomResponse {
                message: "Room deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Room not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete room");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete room".to_string(),
                }),
            )
                .into_response()
        }
    }
}
