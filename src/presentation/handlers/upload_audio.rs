use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadAudioResponse {
    pub chunk_id: Uuid,
    pub transcription_length: usize,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_audio_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
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
        .ingest_audio(RoomId::from_uuid(room_id), &data, &mime_type)
        .await
    {
        Ok(chunk) => (
            StatusCode::CREATED,
            Json(UploadAudioResponse {
                chunk_id: chunk.chunk_id.as_uuid(),
                transcription_length: chunk.transcription_length,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Audio ingestion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to ingest audio: {}", e),
                }),
            )
                .into_response()
        }
    }
}
