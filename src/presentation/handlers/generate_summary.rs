use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct GenerateSummaryRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct GenerateSummaryResponse {
    pub summary: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn generate_summary_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateSummaryRequest>,
) -> impl IntoResponse {
    if request.content.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Content is required".to_string(),
            }),
        )
            .into_response();
    }

    match state.note_service.summarize(&request.content).await {
        Ok(summary) => (StatusCode::OK, Json(GenerateSummaryResponse { summary })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Summary generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate summary".to_string(),
                }),
            )
                .into_response()
        }
    }
}
