use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ErrorResponse;
use crate::application::services::ActivityServiceError;
use crate::domain::ActivityId;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SubmitActivityRequest {
    pub participant: String,
    pub answers: HashMap<String, String>,
}

#[derive(Serialize)]
pub struct SubmitActivityResponse {
    pub id: Uuid,
    pub score: u32,
    pub total_questions: usize,
    pub percentage: u32,
    pub results: Vec<QuestionFeedbackItem>,
}

#[derive(Serialize)]
pub struct QuestionFeedbackItem {
    pub question_id: u32,
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn submit_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
    Json(request): Json<SubmitActivityRequest>,
) -> impl IntoResponse {
    match state
        .activity_service
        .submit(
            ActivityId::from_uuid(activity_id),
            request.participant,
            request.answers,
        )
        .await
    {
        Ok(result) => {
            let results = result
                .results
                .into_iter()
                .map(|f| QuestionFeedbackItem {
                    question_id: f.question_id,
                    question: f.question,
                    user_answer: f.user_answer,
                    correct_answer: f.correct_answer,
                    is_correct: f.is_correct,
                    explanation: f.explanation,
                })
                .collect();

            (
                StatusCode::CREATED,
                Json(SubmitActivityResponse {
                    id: result.attempt_id.as_uuid(),
                    score: result.score,
                    total_questions: result.total_questions,
                    percentage: result.percentage,
                    results,
                }),
            )
                .into_response()
        }
        Err(ActivityServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Activity not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Activity submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to submit activity".to_string(),
                }),
            )
                .into_response()
        }
    }
}
