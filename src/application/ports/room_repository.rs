use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{Room, RoomId};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError>;

    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepositoryError>;

    /// All rooms with their question counts, oldest first.
    async fn list(&self) -> Result<Vec<RoomSummary>, RepositoryError>;

    /// Applies the non-empty fields of the patch and bumps `updated_at`.
    /// Returns the updated room, or `None` when the room does not exist.
    async fn update(&self, id: RoomId, patch: RoomPatch) -> Result<Option<Room>, RepositoryError>;

    /// Deletes the room; chunks, questions and activities cascade with it.
    /// Returns `false` when the room does not exist.
    async fn delete(&self, id: RoomId) -> Result<bool, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}
