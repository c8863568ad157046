use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use super::ErrorResponse;
use super::get_room::RoomResponse;
use crate::application::ports::RoomPatch;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn update_room_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> impl IntoResponse {
    let patch = RoomPatch {
        name: request.name,
        description: request.description,
        content: request.content,
    };

    match state
        .room_repository
        .update(RoomId::from_uuid(room_id), patch)
        .await
    {
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
            tracing::error!(error = %e, "Failed to update room");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update room".to_string(),
                }),
            )
                .into_response()
        }
    }
}
