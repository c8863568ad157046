use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::RoomId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ContinueTextRequest {
    pub room_id: Uuid,
    pub text: String,
}

#[derive(Serialize)]
pub struct ContinueTextResponse {
    pub continuation: String,
    pub has_context: bool,
}

#[tracing::instrument(skip(state, request))]
pub async fn continue_text_handler(
    State(state): State<AppState>,
    Json(request): Json<ContinueTextRequest>,
) -> impl IntoResponse {
    if request.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Text is required".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(text = %sanitize_prompt(&request.text), "Continuing note text");

    match state
        .note_service
        .continue_text(RoomId::from_uuid(request.room_id), &request.text)
        .await
    {
        Ok(continuation) => (
            StatusCode::OK,
            Json(ContinueTextResponse {
                continuation: continuation.text,
                has_context: continuation.has_context,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Text continuation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to continue text".to_string(),
                }),
            )
                .into_response()
        }
    }
}
