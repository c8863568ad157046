use async_trait::async_trait;
use pgvector::Vector;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{
    ChunkSummary, RepositoryError, ScoredChunk, TranscriptChunkRepository,
};
use crate::domain::{ChunkId, Embedding, RoomId, TranscriptChunk};

pub struct PgTranscriptChunkRepository {
    pool: PgPool,
}

impl PgTranscriptChunkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptChunkRepository for PgTranscriptChunkRepository {
    #[instrument(skip(self, chunk), fields(chunk_id = %chunk.id.as_uuid(), room_id = %chunk.room_id.as_uuid()))]
    async fn insert(&self, chunk: &TranscriptChunk) -> Result<(), RepositoryError> {
        let embedding = Vector::from(chunk.embedding.values.clone());

        sqlx::query(
            r#"
            INSERT INTO transcript_chunks (id, room_id, transcription, embedding, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chunk.id.as_uuid())
        .bind(chunk.room_id.as_uuid())
        .bind(&chunk.transcription)
        .bind(embedding)
        .bind(chunk.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, embedding), fields(room_id = %room_id.as_uuid(), threshold = threshold))]
    async fn query_by_similarity(
        &self,
        room_id: RoomId,
        embedding: &Embedding,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, RepositoryError> {
        let query_vector = Vector::from(embedding.values.clone());

        // `embedding <=> $2` is pgvector cosine distance; ordering by it
        // ascending is similarity descending and stays index-friendly.
        let rows = sqlx::query(
            r#"
            SELECT id, transcription, 1 - (embedding <=> $2) AS similarity
            FROM transcript_chunks
            WHERE room_id = $1 AND 1 - (embedding <=> $2) > $3
            ORDER BY embedding <=> $2
            LIMIT $4
            "#,
        )
        .bind(room_id.as_uuid())
        .bind(&query_vector)
        .bind(threshold as f64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ScoredChunk {
                id: ChunkId::from_uuid(r.get("id")),
                transcription: r.get("transcription"),
                similarity: r.get::<f64, _>("similarity") as f32,
            })
            .collect())
    }

    #[instrument(skip(self), fields(room_id = %room_id.as_uuid(), limit = limit))]
    async fn query_recent(
        &self,
        room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT transcription
            FROM transcript_chunks
            WHERE room_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(room_id.as_uuid())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.get("transcription")).collect())
    }

    #[instrument(skip(self), fields(room_id = %room_id.as_uuid()))]
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<ChunkSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, transcription, created_at
            FROM transcript_chunks
            WHERE room_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(room_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ChunkSummary {
                id: ChunkId::from_uuid(r.get("id")),
                transcription: r.get("transcription"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
