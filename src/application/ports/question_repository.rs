use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Question, QuestionId, RoomId};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert(&self, question: &Question) -> Result<QuestionId, RepositoryError>;

    /// Questions of the room, newest first.
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Question>, RepositoryError>;
}
