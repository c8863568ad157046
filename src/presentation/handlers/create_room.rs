use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::Room;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct CreateRoomResponse {
    pub room_id: Uuid,
}

#[tracing::instrument(skip(state, request))]
pub async fn create_room_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Room name is required".to_string(),
            }),
        )
            .into_response();
    }

    let room = Room::new(
        request.owner_id,
        request.name,
        request.description.unwrap_or_default(),
    );
    let room_id = room.id;

    match state.room_repository.insert(&room).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(CreateRoomResponse {
                room_id: room_id.as_uuid(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create room");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create room".to_string(),
                }),
            )
                .into_response()
        }
    }
}
