mod activity_service;
mod ingestion_service;
mod note_service;
mod question_service;

pub use activity_service::{
    ActivityService, ActivityServiceError, QuestionFeedback, SubmissionResult,
};
pub use ingestion_service::{IngestedChunk, IngestionError, IngestionService, RoomFromAudio};
pub use note_service::{Continuation, NoteService, NoteServiceError};
pub use question_service::{
    AnswerGrounding, AskResult, QuestionService, QuestionServiceError, RetrievalConfig,
    RetrievalOutcome, INSUFFICIENT_CONTENT_ANSWER,
};