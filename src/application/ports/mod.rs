mod activity_repository;
mod chunk_repository;
mod embedder;
mod llm_client;
mod question_repository;
mod repository_error;
mod room_repository;
mod transcription_engine;

pub use activity_repository::ActivityRepository;
pub use chunk_repository::{ChunkSummary, ScoredChunk, TranscriptChunkRepository};
pub use embedder::{Embedder, EmbedderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use question_repository::QuestionRepository;
pub use repository_error::RepositoryError;
pub use room_repository::{RoomPatch, RoomRepository, RoomSummary};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
