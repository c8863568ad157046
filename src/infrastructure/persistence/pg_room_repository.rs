use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{RepositoryError, RoomPatch, RoomRepository, RoomSummary};
use crate::domain::{Room, RoomId};

pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn room_from_row(row: PgRow) -> Room {
    Room {
        id: RoomId::from_uuid(row.get("id")),
        owner: row.get("owner_id"),
        name: row.get("name"),
        description: row.get("description"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self, room), fields(room_id = %room.id.as_uuid()))]
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, owner_id, name, description, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room.id.as_uuid())
        .bind(room.owner)
        .bind(&room.name)
        .bind(&room.description)
        .bind(&room.content)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(room_id = %id.as_uuid()))]
    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, description, content, created_at, updated_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(row.map(room_from_row))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<RoomSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name, r.description, COUNT(q.id) AS question_count, r.created_at
            FROM rooms r
            LEFT JOIN questions q ON q.room_id = r.id
            GROUP BY r.id, r.name, r.description, r.created_at
            ORDER BY r.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| RoomSummary {
                id: RoomId::from_uuid(r.get("id")),
                name: r.get("name"),
                description: r.get("description"),
                question_count: r.get("question_count"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    #[instrument(skip(self, patch), fields(room_id = %id.as_uuid()))]
    async fn update(&self, id: RoomId, patch: RoomPatch) -> Result<Option<Room>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE rooms
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                updated_at = $5
            WHERE id = $1
            RETURNING id, owner_id, name, description, content, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.content)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(row.map(room_from_row))
    }

    #[instrument(skip(self), fields(room_id = %id.as_uuid()))]
    async fn delete(&self, id: RoomId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
