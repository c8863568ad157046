use std::sync::Arc;

use crate::application::ports::{
    ActivityRepository, QuestionRepository, RoomRepository, TranscriptChunkRepository,
};
use crate::application::services::{
    ActivityService, IngestionService, NoteService, QuestionService,
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub ingestion_service: Arc<IngestionService>,
    pub activity_service: Arc<ActivityService>,
    pub note_service: Arc<NoteService>,
    pub room_repository: Arc<dyn RoomRepository>,
    pub chunk_repository: Arc<dyn TranscriptChunkRepository>,
    pub question_repository: Arc<dyn QuestionRepository>,
    pub activity_repository: Arc<dyn ActivityRepository>,
}
