use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use super::ErrorResponse;
use super::activity_types::ActivityPayload;
use crate::domain::ActivityId;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn get_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .activity_repository
        .get(ActivityId::from_uuid(activity_id))
        .await
    {
        Ok(Some(activity)) => {
            (StatusCode::OK, Json(ActivityPayload::from(activity))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Activity not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch activity");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch activity".to_string(),
                }),
            )
                .into_response()
        }
    }
}
