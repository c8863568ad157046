use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RoomListItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

#[tracing::instrument(skip(state))]
pub async fn get_rooms_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.room_repository.list().await {
        Ok(rooms) => {
            let items: Vec<RoomListItem> = rooms
                .into_iter()
                .map(|r| RoomListItem {
                    id: r.id.as_uuid(),
                    name: r.name,
                    description: r.description,
                    question_count: r.question_count,
                    created_at: r.created_at,
                })
                .collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list rooms");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list rooms".to_string(),
                }),
            )
                .into_response()
        }
    }
}
