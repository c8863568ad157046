use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    continue_text_handler, create_activity_handler, create_question_handler, create_room_handler,
    create_room_from_audio_handler, delete_activity_handler, delete_room_handler,
    generate_summary_handler, get_activities_handler, get_activity_handler,
    get_audio_chunks_handler, get_questions_handler, get_room_handler, get_rooms_handler,
    health_handler, submit_activity_handler, update_room_handler, upload_audio_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/rooms",
            post(create_room_handler).get(get_rooms_handler),
        )
        .route(
            "/api/v1/rooms/from-audio",
            post(create_room_from_audio_handler),
        )
        .route(
            "/api/v1/rooms/{room_id}",
            get(get_room_handler)
                .patch(update_room_handler)
                .delete(delete_room_handler),
        )
        .route("/api/v1/rooms/{room_id}/audio", post(upload_audio_handler))
        .route(
            "/api/v1/rooms/{room_id}/chunks",
            get(get_audio_chunks_handler),
        )
        .route(
            "/api/v1/rooms/{room_id}/questions",
            post(create_question_handler).get(get_questions_handler),
        )
        .route(
            "/api/v1/rooms/{room_id}/activities",
            post(create_activity_handler).get(get_activities_handler),
        )
        .route(
            "/api/v1/activities/{activity_id}",
            get(get_activity_handler).delete(delete_activity_handler),
        )
        .route(
            "/api/v1/activities/{activity_id}/submit",
            post(submit_activity_handler),
        )
        .route("/api/v1/ai/continue-text", post(continue_text_handler))
        .route("/api/v1/ai/summary", post(generate_summary_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
