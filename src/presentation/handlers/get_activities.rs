use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use super::ErrorResponse;
use super::activity_types::ActivityPayload;
use crate::domain::RoomId;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn get_activities_handler(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> impl IntoResponse {
    match state
        .activity_repository
        .list_by_room(RoomId::from_uuid(room_id))
        .await
    {
        Ok(activities) => {
            let items: Vec<ActivityPayload> =
                activities.into_iter().map(ActivityPayload::from).collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list activities");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list activities".to_string(),
                }),
            )
                .into_response()
        }
    }
}
