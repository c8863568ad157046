mod memory_repositories;
mod pg_activity_repository;
mod pg_chunk_repository;
mod pg_pool;
mod pg_question_repository;
mod pg_room_repository;

pub use memory_repositories::{
    InMemoryActivityRepository, InMemoryQuestionRepository, InMemoryRoomRepository,
    InMemoryTranscriptChunkRepository,
};
pub use pg_activity_repository::PgActivityRepository;
pub use pg_chunk_repository::PgTranscriptChunkRepository;
pub use pg_pool::create_pool;
pub use pg_question_repository::PgQuestionRepository;
pub use pg_room_repository::PgRoomRepository;
