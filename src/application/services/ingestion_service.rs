use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, RepositoryError, RoomRepository,
    TranscriptChunkRepository, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ChunkId, Room, RoomId, TranscriptChunk};

pub struct IngestionService {
    transcription_engine: Arc<dyn TranscriptionEngine>,
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    chunk_repository: Arc<dyn TranscriptChunkRepository>,
    room_repository: Arc<dyn RoomRepository>,
}

#[derive(Debug)]
pub struct IngestedChunk {
    pub chunk_id: ChunkId,
    pub transcription_length: usize,
}

#[derive(Debug)]
pub struct RoomFromAudio {
    pub room_id: RoomId,
    pub chunk_id: ChunkId,
}

impl IngestionService {
    pub fn new(
        transcription_engine: Arc<dyn TranscriptionEngine>,
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        chunk_repository: Arc<dyn TranscriptChunkRepository>,
        room_repository: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            transcription_engine,
            embedder,
            llm_client,
            chunk_repository,
            room_repository,
        }
    }

    /// Transcribes one audio recording, embeds the transcription and stores
    /// the resulting chunk. Transcription and embedding failures abort the
    /// request; nothing is persisted.
    #[tracing::instrument(skip(self, audio_data), fields(room_id = %room_id.as_uuid(), bytes = audio_data.len()))]
    pub async fn ingest_audio(
        &self,
        room_id: RoomId,
        audio_data: &[u8],
        mime_type: &str,
    ) -> Result<IngestedChunk, IngestionError> {
        let transcription = self
            .transcription_engine
            .transcribe(audio_data, mime_type)
            .await?;

        let embedding = self.embedder.embed(&transcription).await?;

        let chunk = TranscriptChunk::new(room_id, transcription, embedding);
        let chunk_id = chunk.id;
        let transcription_length = chunk.transcription.len();

        self.chunk_repository.insert(&chunk).await?;

        tracing::info!(
            chunk_id = %chunk_id.as_uuid(),
            transcription_length = transcription_length,
            "Audio chunk ingested"
        );

        Ok(IngestedChunk {
            chunk_id,
            transcription_length,
        })
    }

    /// Creates a room named after the recording's content, then ingests the
    /// recording into it. Title generation degrades to a transcription
    /// preview when the provider's output does not parse.
    #[tracing::instrument(skip(self, audio_data), fields(bytes = audio_data.len()))]
    pub async fn create_room_from_audio(
        &self,
        audio_data: &[u8],
        mime_type: &str,
    ) -> Result<RoomFromAudio, IngestionError> {
        let transcription = self
            .transcription_engine
            .transcribe(audio_data, mime_type)
            .await?;

        let info = self.generate_room_info(&transcription).await;

        let room = Room::new(None, info.title, info.description);
        let room_id = room.id;
        self.room_repository.insert(&room).await?;

        let embedding = self.embedder.embed(&transcription).await?;
        let chunk = TranscriptChunk::new(room_id, transcription, embedding);
        let chunk_id = chunk.id;
        self.chunk_repository.insert(&chunk).await?;

        Ok(RoomFromAudio { room_id, chunk_id })
    }

    async fn generate_room_info(&self, transcription: &str) -> RoomInfo {
        let preview: String = transcription.chars().take(2000).collect();
        let prompt = format!(
            "Based on the audio transcription below, produce a title and a \
description for a study room.\n\nTRANSCRIPTION: {}\n\nRespond with JSON only, \
no extra text:\n{{\"title\": \"...\", \"description\": \"...\"}}",
            preview
        );

        match self.llm_client.generate(&prompt).await {
            Ok(raw) => match serde_json::from_str::<RoomInfo>(strip_code_fences(&raw)) {
                Ok(info) => RoomInfo {
                    title: truncate_chars(&info.title, 100),
                    description: truncate_chars(&info.description, 300),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Room info response did not parse, using preview");
                    RoomInfo::preview_fallback(transcription)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Room info generation failed, using preview");
                RoomInfo::preview_fallback(transcription)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoomInfo {
    title: String,
    description: String,
}

impl RoomInfo {
    fn preview_fallback(transcription: &str) -> Self {
        let preview = transcription
            .split_whitespace()
            .take(10)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            title: format!("Lesson on {}", truncate_chars(&preview, 50)),
            description: format!(
                "Room created automatically from a recording. Covers: {}",
                truncate_chars(&preview, 150)
            ),
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

pub(crate) fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}
