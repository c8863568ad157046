use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ErrorResponse;
use crate::domain::RoomId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct CreateQuestionResponse {
    pub question_id: Uuid,
}

#[tracing::instrument(skip(state, request))]
pub async fn create_question_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<CreateQuestionRequest>,
) -> impl IntoResponse {
    if request.question.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Question is required".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    match state
        .question_service
        .ask(RoomId::from_uuid(room_id), &request.question)
        .await
    {
        Ok(result) => {
            tracing::info!(
                question_id = %result.question_id.as_uuid(),
                grounding = ?result.grounding,
                "Question answered"
            );
            (
                StatusCode::CREATED,
                Json(CreateQuestionResponse {
                    question_id: result.question_id.as_uuid(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Question pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create question: {}", e),
                }),
            )
                .into_response()
        }
    }
}
