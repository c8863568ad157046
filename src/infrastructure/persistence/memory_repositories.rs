use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    ActivityRepository, ChunkSummary, QuestionRepository, RepositoryError, RoomPatch,
    RoomRepository, RoomSummary, ScoredChunk, TranscriptChunkRepository,
};
use crate::domain::{
    Activity, ActivityAttempt, ActivityId, Embedding, Question, QuestionId, Room, RoomId,
    TranscriptChunk,
};

/// In-memory repositories for tests and scaffolded local runs. Similarity
/// queries compute real cosine scores against the stored embeddings, so the
/// threshold cascade behaves exactly as it does against the database.
#[derive(Default)]
pub struct InMemoryTranscriptChunkRepository {
    chunks: Mutex<Vec<TranscriptChunk>>,
}

impl InMemoryTranscriptChunkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptChunkRepository for InMemoryTranscriptChunkRepository {
    async fn insert(&self, chunk: &TranscriptChunk) -> Result<(), RepositoryError> {
        self.chunks
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?
            .push(chunk.clone());
        Ok(())
    }

    async fn query_by_similarity(
        &self,
        room_id: RoomId,
        embedding: &Embedding,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, RepositoryError> {
        let chunks = self
            .chunks
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .filter(|c| c.room_id == room_id)
            .map(|c| ScoredChunk {
                id: c.id,
                transcription: c.transcription.clone(),
                similarity: c.embedding.cosine_similarity(embedding),
            })
            .filter(|s| s.similarity > threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }

    async fn query_recent(
        &self,
        room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<String>, RepositoryError> {
        let chunks = self
            .chunks
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(chunks
            .iter()
            .filter(|c| c.room_id == room_id)
            .rev()
            .take(limit)
            .map(|c| c.transcription.clone())
            .collect())
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<ChunkSummary>, RepositoryError> {
        let chunks = self
            .chunks
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(chunks
            .iter()
            .filter(|c| c.room_id == room_id)
            .map(|c| ChunkSummary {
                id: c.id,
                transcription: c.transcription.clone(),
                created_at: c.created_at,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Mutex<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Question> {
        self.questions
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<QuestionId, RepositoryError> {
        self.questions
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?
            .push(question.clone());
        Ok(question.id)
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Question>, RepositoryError> {
        let questions = self
            .questions
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(questions
            .iter()
            .filter(|q| q.room_id == room_id)
            .rev()
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<Vec<Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        self.rooms
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?
            .push(room.clone());
        Ok(())
    }

    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        let rooms = self
            .rooms
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<RoomSummary>, RepositoryError> {
        let rooms = self
            .rooms
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(rooms
            .iter()
            .map(|r| RoomSummary {
                id: r.id,
                name: r.name.clone(),
                description: r.description.clone(),
                question_count: 0,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn update(&self, id: RoomId, patch: RoomPatch) -> Result<Option<Room>, RepositoryError> {
        let mut rooms = self
            .rooms
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        let Some(room) = rooms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            room.name = name;
        }
        if let Some(description) = patch.description {
            room.description = description;
        }
        if let Some(content) = patch.content {
            room.content = content;
        }
        room.updated_at = chrono::Utc::now();

        Ok(Some(room.clone()))
    }

    async fn delete(&self, id: RoomId) -> Result<bool, RepositoryError> {
        let mut rooms = self
            .rooms
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        Ok(rooms.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Mutex<Vec<Activity>>,
    attempts: Mutex<Vec<ActivityAttempt>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Vec<ActivityAttempt> {
        self.attempts
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn insert(&self, activity: &Activity) -> Result<(), RepositoryError> {
        self.activities
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?
            .push(activity.clone());
        Ok(())
    }

    async fn get(&self, id: ActivityId) -> Result<Option<Activity>, RepositoryError> {
        let activities = self
            .activities
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(activities.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Activity>, RepositoryError> {
        let activities = self
            .activities
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        Ok(activities
            .iter()
            .filter(|a| a.room_id == room_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn delete(&self, id: ActivityId) -> Result<bool, RepositoryError> {
        let mut activities = self
            .activities
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?;

        let before = activities.len();
        activities.retain(|a| a.id != id);
        Ok(activities.len() < before)
    }

    async fn insert_attempt(&self, attempt: &ActivityAttempt) -> Result<(), RepositoryError> {
        self.attempts
            .lock()
            .map_err(|_| RepositoryError::QueryFailed("lock poisoned".to_string()))?
            .push(attempt.clone());
        Ok(())
    }
}
