use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Activity, ActivityAttempt, ActivityId, RoomId};

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert(&self, activity: &Activity) -> Result<(), RepositoryError>;

    async fn get(&self, id: ActivityId) -> Result<Option<Activity>, RepositoryError>;

    /// Activities of the room, newest first.
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Activity>, RepositoryError>;

    /// Returns `false` when the activity does not exist.
    async fn delete(&self, id: ActivityId) -> Result<bool, RepositoryError>;

    async fn insert_attempt(&self, attempt: &ActivityAttempt) -> Result<(), RepositoryError>;
}
