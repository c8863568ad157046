use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Activity, QuizQuestion};

/// Wire shape of an activity, shared by the create/get/list handlers.
#[derive(Serialize)]
pub struct ActivityPayload {
    pub id: Uuid,
    pub room_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
    pub time_limit_minutes: Option<u32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Activity> for ActivityPayload {
    fn from(activity: Activity) -> Self {
        let total_questions = activity.total_questions();
        Self {
            id: activity.id.as_uuid(),
            room_id: activity.room_id.as_uuid(),
            title: activity.title,
            description: activity.description,
            questions: activity.questions,
            total_questions,
            time_limit_minutes: activity.time_limit_minutes,
            is_active: activity.is_active,
            created_at: activity.created_at,
        }
    }
}
