use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn get_room_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.room_repository.get(RoomId::from_uuid(room_id)).await {
        Ok(Some(room)) => (
            StatusCode::OK,
            Json(RoomResponse {
                id: room.id.as_uuid(),
                name: room.name,
                description: room.description,
                content: room.content,
                created_at: room.created_at,
                updated_at: room.updated_at,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Room not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch room");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch room".to_string(),
                }),
            )
                .into_response()
        }
    }
}
