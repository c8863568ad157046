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
pub struct AudioChunkItem {
    pub id: Uuid,
    pub transcription: String,
    pub created_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn get_audio_chunks_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    let room_id = RoomId::from_uuid(room_id);

    match state.room_repository.get(room_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Room not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch room");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch room".to_string(),
                }),
            )
                .into_response();
        }
    }

    match state.chunk_repository.list_by_room(room_id).await {
        Ok(chunks) => {
            let items: Vec<AudioChunkItem> = chunks
                .into_iter()
                .map(|c| AudioChunkItem {
                    id: c.id.as_uuid(),
                    transcription: c.transcription,
                    created_at: c.created_at,
                })
                .collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list audio chunks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list audio chunks".to_string(),
                }),
            )
                .into_response()
        }
    }
}
