use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Embedding, RoomId};

/// One audio recording's transcription together with its embedding.
/// Immutable once created: chunks are only ever inserted, and removed in
/// bulk when their room is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptChunk {
    pub id: ChunkId,
    pub room_id: RoomId,
    pub transcription: String,
    pub embedding: Embedding,
    pub created_at: DateTime<Utc>,
}

impl TranscriptChunk {
    pub fn new(room_id: RoomId, transcription: String, embedding: Embedding) -> Self {
        Self {
            id: ChunkId::new(),
            room_id,
            transcription,
            embedding,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}
