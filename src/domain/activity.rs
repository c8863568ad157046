use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RoomId;

/// A generated multiple-choice quiz for a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub room_id: RoomId,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuizQuestion>,
    pub time_limit_minutes: Option<u32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        room_id: RoomId,
        title: String,
        description: Option<String>,
        questions: Vec<QuizQuestion>,
        time_limit_minutes: Option<u32>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            room_id,
            title,
            description,
            questions,
            time_limit_minutes,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// One quiz question, serialized as-is into the activity's jsonb column.
/// The camelCase renames match the shape the generative provider is asked
/// to produce, so the parsed output can be stored without reshaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub alternatives: Vec<QuizAlternative>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAlternative {
    pub id: String,
    pub text: String,
}

/// A submitted attempt at an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityAttempt {
    pub id: AttemptId,
    pub activity_id: ActivityId,
    pub participant: String,
    pub answers: HashMap<String, String>,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

impl ActivityAttempt {
    pub fn new(
        activity_id: ActivityId,
        participant: String,
        answers: HashMap<String, String>,
        score: u32,
    ) -> Self {
        Self {
            id: AttemptId::new(),
            activity_id,
            participant,
            answers,
            score,
            completed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityId(Uuid);

impl ActivityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}
