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
pub struct QuestionItem {
    pub id: Uuid,
    pub room_id: Uuid,
    pub question: String,
    pub answer: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn get_questions_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .question_repository
        .list_by_room(RoomId::from_uuid(room_id))
        .await
    {
        Ok(questions) => {
            let items: Vec<QuestionItem> = questions
                .into_iter()
                .map(|q| QuestionItem {
                    id: q.id.as_uuid(),
                    room_id: q.room_id.as_uuid(),
                    question: q.question,
                    answer: q.answer,
                    created_at: q.created_at,
                })
                .collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list questions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list questions".to_string(),
                }),
            )
                .into_response()
        }
    }
}
