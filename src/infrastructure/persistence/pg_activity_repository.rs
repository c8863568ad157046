use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{ActivityRepository, RepositoryError};
use crate::domain::{Activity, ActivityAttempt, ActivityId, QuizQuestion, RoomId};

pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn activity_from_row(row: PgRow) -> Result<Activity, RepositoryError> {
    let questions: Vec<QuizQuestion> =
        serde_json::from_value(row.get::<serde_json::Value, _>("questions"))
            .map_err(|e| RepositoryError::QueryFailed(format!("questions column: {}", e)))?;

    Ok(Activity {
        id: ActivityId::from_uuid(row.get("id")),
        room_id: RoomId::from_uuid(row.get("room_id")),
        title: row.get("title"),
        description: row.get("description"),
        questions,
        time_limit_minutes: row.get::<Option<i32>, _>("time_limit_minutes").map(|v| v as u32),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self, activity), fields(activity_id = %activity.id.as_uuid(), room_id = %activity.room_id.as_uuid()))]
    async fn insert(&self, activity: &Activity) -> Result<(), RepositoryError> {
        let questions = serde_json::to_value(&activity.questions)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO activities
                (id, room_id, title, description, questions, total_questions,
                 time_limit_minutes, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(activity.id.as_uuid())
        .bind(activity.room_id.as_uuid())
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(questions)
        .bind(activity.total_questions() as i32)
        .bind(activity.time_limit_minutes.map(|v| v as i32))
        .bind(activity.is_active)
        .bind(activity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(activity_id = %id.as_uuid()))]
    async fn get(&self, id: ActivityId) -> Result<Option<Activity>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, room_id, title, description, questions, time_limit_minutes,
                   is_active, created_at
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(activity_from_row).transpose()
    }

    #[instrument(skip(self), fields(room_id = %room_id.as_uuid()))]
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Activity>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_id, title, description, questions, time_limit_minutes,
                   is_active, created_at
            FROM activities
            WHERE room_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.into_iter().map(activity_from_row).collect()
    }

    #[instrument(skip(self), fields(activity_id = %id.as_uuid()))]
    async fn delete(&self, id: ActivityId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, attempt), fields(attempt_id = %attempt.id.as_uuid(), activity_id = %attempt.activity_id.as_uuid()))]
    async fn insert_attempt(&self, attempt: &ActivityAttempt) -> Result<(), RepositoryError> {
        let answers = serde_json::to_value(&attempt.answers)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO activity_attempts (id, activity_id, participant, answers, score, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(attempt.id.as_uuid())
        .bind(attempt.activity_id.as_uuid())
        .bind(&attempt.participant)
        .bind(answers)
        .bind(attempt.score as i32)
        .bind(attempt.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
