mod activity;
mod embedding;
mod question;
mod room;
mod transcript_chunk;

pub use activity::{
    Activity, ActivityAttempt, ActivityId, AttemptId, QuizAlternative, QuizQuestion,
};
pub use embedding::Embedding;
pub use question::{Question, QuestionId};
pub use room::{Room, RoomId};
pub use transcript_chunk::{ChunkId, TranscriptChunk};
