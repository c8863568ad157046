use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{QuestionRepository, RepositoryError};
use crate::domain::{Question, QuestionId, RoomId};

pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    #[instrument(skip(self, question), fields(question_id = %question.id.as_uuid(), room_id = %question.room_id.as_uuid()))]
    async fn insert(&self, question: &Question) -> Result<QuestionId, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, room_id, question, answer, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(question.id.as_uuid())
        .bind(question.room_id.as_uuid())
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(question.id)
    }

    #[instrument(skip(self), fields(room_id = %room_id.as_uuid()))]
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Question>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_id, question, answer, created_at
            FROM questions
            WHERE room_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| Question {
                id: QuestionId::from_uuid(r.get("id")),
                room_id: RoomId::from_uuid(r.get("room_id")),
                question: r.get("question"),
                answer: r.get("answer"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
