use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use salamanca::application::ports::{
    ActivityRepository, Embedder, LlmClient, QuestionRepository, RoomRepository,
    TranscriptChunkRepository, TranscriptionEngine,
};
use salamanca::application::services::{
    ActivityService, IngestionService, NoteService, QuestionService,
};
use salamanca::infrastructure::llm::GeminiClient;
use salamanca::infrastructure::observability::{TracingConfig, init_tracing};
use salamanca::infrastructure::persistence::{
    PgActivityRepository, PgQuestionRepository, PgRoomRepository, PgTranscriptChunkRepository,
    create_pool,
};
use salamanca::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!().run(&pool).await?;

    let gemini = Arc::new(GeminiClient::new(
        settings.gemini.api_key.clone(),
        settings.gemini.generation_model.clone(),
        settings.gemini.embedding_model.clone(),
    ));
    let embedder: Arc<dyn Embedder> = gemini.clone();
    let llm_client: Arc<dyn LlmClient> = gemini.clone();
    let transcription_engine: Arc<dyn TranscriptionEngine> = gemini;

    let room_repository: Arc<dyn RoomRepository> = Arc::new(PgRoomRepository::new(pool.clone()));
    let chunk_repository: Arc<dyn TranscriptChunkRepository> =
        Arc::new(PgTranscriptChunkRepository::new(pool.clone()));
    let question_repository: Arc<dyn QuestionRepository> =
        Arc::new(PgQuestionRepository::new(pool.clone()));
    let activity_repository: Arc<dyn ActivityRepository> =
        Arc::new(PgActivityRepository::new(pool));

    let question_service = Arc::new(QuestionService::new(
        Arc::clone(&embedder),
        Arc::clone(&llm_client),
        Arc::clone(&chunk_repository),
        Arc::clone(&question_repository),
        settings.retrieval.clone(),
    ));

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::clone(&transcription_engine),
        Arc::clone(&embedder),
        Arc::clone(&llm_client),
        Arc::clone(&chunk_repository),
        Arc::clone(&room_repository),
    ));

    let activity_service = Arc::new(ActivityService::new(
        Arc::clone(&llm_client),
        Arc::clone(&chunk_repository),
        Arc::clone(&activity_repository),
    ));

    let note_service = Arc::new(NoteService::new(
        Arc::clone(&llm_client),
        Arc::clone(&chunk_repository),
    ));

    let state = AppState {
        question_service,
        ingestion_service,
        activity_service,
        note_service,
        room_repository,
        chunk_repository,
        question_repository,
        activity_repository,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
