mod application;
mod domain;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use salamanca::application::ports::TranscriptChunkRepository;
use salamanca::application::services::{
    ActivityService, INSUFFICIENT_CONTENT_ANSWER, IngestionService, NoteService, QuestionService,
    RetrievalConfig,
};
use salamanca::domain::{Embedding, Room, RoomId, TranscriptChunk};
use salamanca::infrastructure::llm::{MockEmbedder, MockLlmClient, MockTranscriptionEngine};
use salamanca::infrastructure::persistence::{
    InMemoryActivityRepository, InMemoryQuestionRepository, InMemoryRoomRepository,
    InMemoryTranscriptChunkRepository,
};
use salamanca::presentation::{AppState, create_router};

struct TestApp {
    router: axum::Router,
    rooms: Arc<InMemoryRoomRepository>,
    chunks: Arc<InMemoryTranscriptChunkRepository>,
    questions: Arc<InMemoryQuestionRepository>,
}

fn create_test_app() -> TestApp {
    let embedder = Arc::new(MockEmbedder);
    let llm_client = Arc::new(MockLlmClient);
    let transcription_engine = Arc::new(MockTranscriptionEngine);

    let rooms = Arc::new(InMemoryRoomRepository::new());
    let chunks = Arc::new(InMemoryTranscriptChunkRepository::new());
    let questions = Arc::new(InMemoryQuestionRepository::new());
    let activities = Arc::new(InMemoryActivityRepository::new());

    let question_service = Arc::new(QuestionService::new(
        embedder.clone(),
        llm_client.clone(),
        chunks.clone(),
        questions.clone(),
        RetrievalConfig::default(),
    ));

    let ingestion_service = Arc::new(IngestionService::new(
        transcription_engine,
        embedder,
        llm_client.clone(),
        chunks.clone(),
        rooms.clone(),
    ));

    let activity_service = Arc::new(ActivityService::new(
        llm_client.clone(),
        chunks.clone(),
        activities.clone(),
    ));

    let note_service = Arc::new(NoteService::new(llm_client, chunks.clone()));

    let state = AppState {
        question_service,
        ingestion_service,
        activity_service,
        note_service,
        room_repository: rooms.clone(),
        chunk_repository: chunks.clone(),
        question_repository: questions.clone(),
        activity_repository: activities,
    };

    TestApp {
        router: create_router(state),
        rooms,
        chunks,
        questions,
    }
}

async fn seed_room(app: &TestApp) -> RoomId {
    use salamanca::application::ports::RoomRepository;

    let room = Room::new(None, "Test room".to_string(), "A room for tests".to_string());
    let room_id = room.id;
    app.rooms.insert(&room).await.unwrap();
    room_id
}

async fn seed_chunk(app: &TestApp, room_id: RoomId) {
    app.chunks
        .insert(&TranscriptChunk::new(
            room_id,
            "The lecture explained how plants convert light into energy.".to_string(),
            Embedding::new(vec![0.1; 768]),
        ))
        .await
        .unwrap();
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_valid_payload_when_creating_room_then_room_is_retrievable() {
    let app = create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rooms")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name": "Biology", "description": "Cells"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let room_id = body["room_id"].as_str().unwrap().to_string();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/rooms/{}", room_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Biology");
}

#[tokio::test]
async fn given_blank_name_when_creating_room_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rooms")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_missing_body_when_creating_question_then_returns_bad_request() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/questions", room_id.as_uuid()))
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_room_with_chunk_when_creating_question_then_answer_comes_from_provider() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;
    seed_chunk(&app, room_id).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/questions", room_id.as_uuid()))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"question": "How do plants make energy?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert!(body["question_id"].as_str().is_some());

    let stored = app.questions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].question, "How do plants make energy?");
    assert_eq!(stored[0].answer.as_deref(), Some("Mock answer"));
}

#[tokio::test]
async fn given_empty_room_when_creating_question_then_fixed_answer_is_persisted() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/questions", room_id.as_uuid()))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"question": "Anyone here?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = app.questions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].answer.as_deref(), Some(INSUFFICIENT_CONTENT_ANSWER));
}

#[tokio::test]
async fn given_unknown_room_when_fetching_then_returns_not_found() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/rooms/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_unknown_room_when_deleting_then_returns_not_found() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/rooms/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_audio_upload_when_ingesting_then_chunk_is_stored() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"lecture.webm\"\r\n\
Content-Type: audio/webm\r\n\r\n\
fake audio bytes\r\n\
--{boundary}--\r\n"
    );

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/audio", room_id.as_uuid()))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert!(body["chunk_id"].as_str().is_some());

    let chunks = app.chunks.list_by_room(room_id).await.unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(
        chunks[0].transcription,
        "Mock transcription of the uploaded recording."
    );
}

#[tokio::test]
async fn given_room_with_chunk_when_creating_activity_then_returns_created() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;
    seed_chunk(&app, room_id).await;

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/activities", room_id.as_uuid()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // MockLlmClient does not produce quiz JSON, so the stub activity is used.
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["total_questions"], 1);
}

#[tokio::test]
async fn given_empty_room_when_creating_activity_then_returns_bad_request() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/rooms/{}/activities", room_id.as_uuid()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_room_with_chunks_when_continuing_text_then_reports_context() {
    let app = create_test_app();
    let room_id = seed_room(&app).await;
    seed_chunk(&app, room_id).await;

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ai/continue-text")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"room_id": "{}", "text": "Plants capture light"}}"#,
                    room_id.as_uuid()
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["has_context"], true);
    assert_eq!(body["continuation"], "Mock answer");
}
