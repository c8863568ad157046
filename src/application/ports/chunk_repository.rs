use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{ChunkId, Embedding, RoomId, TranscriptChunk};

#[async_trait]
pub trait TranscriptChunkRepository: Send + Sync {
    async fn insert(&self, chunk: &TranscriptChunk) -> Result<(), RepositoryError>;

    /// Chunks of the room whose cosine similarity to `embedding` is strictly
    /// greater than `threshold`, ordered by similarity descending, capped at
    /// `limit`.
    async fn query_by_similarity(
        &self,
        room_id: RoomId,
        embedding: &Embedding,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, RepositoryError>;

    /// Transcriptions of the most recent chunks of the room, newest first,
    /// with no similarity filter.
    async fn query_recent(
        &self,
        room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<String>, RepositoryError>;

    /// All chunks of the room, oldest first.
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<ChunkSummary>, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub id: ChunkId,
    pub transcription: String,
    pub similarity: f32,
}

#[derive(Debug, Clone)]
pub struct ChunkSummary {
    pub id: ChunkId,
    pub transcription: String,
    pub created_at: DateTime<Utc>,
}
