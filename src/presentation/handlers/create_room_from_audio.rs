use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RoomFromAudioResponse {
    pub room_id: Uuid,
    pub chunk_id: Uuid,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_room_from_audio_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid multipart request: {}", e),
                }),
            )
                .into_response();
        }
    };

    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read uploaded file: {}", e),
                }),
            )
                .into_response();
        }
    };

    match state
        .ingestion_service
        .create_room_from_audio(&data, &mime_type)
        .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(RoomFromAudioResponse {
                room_id: created.room_id.as_uuid(),
                chunk_id: created.chunk_id.as_uuid(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Room creation from audio failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create room from audio: {}", e),
                }),
            )
                .into_response()
        }
    }
}
