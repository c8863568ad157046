use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{
    ActivityRepository, LlmClient, LlmClientError, RepositoryError, TranscriptChunkRepository,
};
use super::ingestion_service::strip_code_fences;
use crate::domain::{
    Activity, ActivityAttempt, ActivityId, AttemptId, QuizAlternative, QuizQuestion, RoomId,
};

pub struct ActivityService {
    llm_client: Arc<dyn LlmClient>,
    chunk_repository: Arc<dyn TranscriptChunkRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
}

impl ActivityService {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        chunk_repository: Arc<dyn TranscriptChunkRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            llm_client,
            chunk_repository,
            activity_repository,
        }
    }

    /// Generates a multiple-choice quiz from the room's accumulated
    /// transcriptions and persists it. Malformed provider output degrades to
    /// a single-question stub rather than failing the request.
    #[tracing::instrument(skip(self), fields(room_id = %room_id.as_uuid()))]
    pub async fn generate(&self, room_id: RoomId) -> Result<Activity, ActivityServiceError> {
        let chunks = self.chunk_repository.list_by_room(room_id).await?;

        if chunks.is_empty() {
            return Err(ActivityServiceError::NoContent);
        }

        let context = chunks
            .iter()
            .map(|c| c.transcription.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let raw = self
            .llm_client
            .generate(&build_quiz_prompt(&context))
            .await
            .map_err(ActivityServiceError::Generation)?;

        let generated = parse_generated_activity(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Quiz response did not parse, using stub activity");
            GeneratedActivity::stub()
        });

        let activity = Activity::new(
            room_id,
            generated.title,
            generated.description,
            generated.questions,
            generated.time_limit,
        );

        self.activity_repository.insert(&activity).await?;

        tracing::info!(
            activity_id = %activity.id.as_uuid(),
            question_count = activity.total_questions(),
            "Activity created"
        );

        Ok(activity)
    }

    /// Grades a submitted attempt against the activity's answer key and
    /// persists it. An unanswered question counts as wrong.
    #[tracing::instrument(skip(self, answers), fields(activity_id = %activity_id.as_uuid()))]
    pub async fn submit(
        &self,
        activity_id: ActivityId,
        participant: String,
        answers: HashMap<String, String>,
    ) -> Result<SubmissionResult, ActivityServiceError> {
        let activity = self
            .activity_repository
            .get(activity_id)
            .await?
            .ok_or(ActivityServiceError::NotFound)?;

        let mut score: u32 = 0;
        let mut results = Vec::with_capacity(activity.questions.len());

        for question in &activity.questions {
            let user_answer = answers.get(&question.id.to_string()).cloned();
            let is_correct = user_answer.as_deref() == Some(question.correct_answer.as_str());
            if is_correct {
                score += 1;
            }

            results.push(QuestionFeedback {
                question_id: question.id,
                question: question.question.clone(),
                user_answer,
                correct_answer: question.correct_answer.clone(),
                is_correct,
                explanation: question.explanation.clone(),
            });
        }

        let attempt = ActivityAttempt::new(activity_id, participant, answers, score);
        let attempt_id = attempt.id;
        self.activity_repository.insert_attempt(&attempt).await?;

        let total_questions = activity.questions.len();
        let percentage = if total_questions == 0 {
            0
        } else {
            ((score as f64 / total_questions as f64) * 100.0).round() as u32
        };

        Ok(SubmissionResult {
            attempt_id,
            score,
            total_questions,
            percentage,
            results,
        })
    }
}

#[derive(Debug)]
pub struct SubmissionResult {
    pub attempt_id: AttemptId,
    pub score: u32,
    pub total_questions: usize,
    pub percentage: u32,
    pub results: Vec<QuestionFeedback>,
}

#[derive(Debug, Clone)]
pub struct QuestionFeedback {
    pub question_id: u32,
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedActivity {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    time_limit: Option<u32>,
    questions: Vec<QuizQuestion>,
}

impl GeneratedActivity {
    fn stub() -> Self {
        Self {
            title: "Activity on the lesson content".to_string(),
            description: Some("Test your knowledge of the concepts presented".to_string()),
            time_limit: Some(15),
            questions: vec![QuizQuestion {
                id: 1,
                question: "Based on the content presented, what is the main concept discussed?"
                    .to_string(),
                alternatives: vec![
                    alternative("A", "A concept related to the topic"),
                    alternative("B", "Another important concept"),
                    alternative("C", "A secondary concept"),
                    alternative("D", "An unrelated concept"),
                ],
                correct_answer: "A".to_string(),
                explanation: Some(
                    "This is the correct answer based on the content presented.".to_string(),
                ),
            }],
        }
    }
}

fn alternative(id: &str, text: &str) -> QuizAlternative {
    QuizAlternative {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn parse_generated_activity(raw: &str) -> Result<GeneratedActivity, String> {
    let cleaned = strip_code_fences(raw);
    let generated: GeneratedActivity =
        serde_json::from_str(cleaned).map_err(|e| e.to_string())?;

    if generated.questions.is_empty() {
        return Err("no questions in generated activity".to_string());
    }

    Ok(generated)
}

fn build_quiz_prompt(context: &str) -> String {
    format!(
        "You are a teacher creating educational activities from lesson \
content.\n\nLESSON CONTENT: {}\n\nTASK: create a multiple-choice activity \
based on the content above.\n\nINSTRUCTIONS:\n\
1. Identify the main concepts and write 5 multiple-choice questions\n\
2. Each question has 4 alternatives (A, B, C, D) and exactly one correct \
answer\n\
3. Mix conceptual, practical and applied questions\n\
4. Respond with JSON only, in this exact shape:\n\n\
{{\n  \"title\": \"Activity name\",\n  \"description\": \"Short description\",\n  \
\"timeLimit\": 15,\n  \"questions\": [\n    {{\n      \"id\": 1,\n      \
\"question\": \"Question text?\",\n      \"alternatives\": [\n        \
{{\"id\": \"A\", \"text\": \"Alternative A\"}},\n        \
{{\"id\": \"B\", \"text\": \"Alternative B\"}},\n        \
{{\"id\": \"C\", \"text\": \"Alternative C\"}},\n        \
{{\"id\": \"D\", \"text\": \"Alternative D\"}}\n      ],\n      \
\"correctAnswer\": \"A\",\n      \"explanation\": \"Why A is correct\"\n    \
}}\n  ]\n}}\n\nRespond with the JSON only, no additional text.",
        context
    )
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityServiceError {
    #[error("room has no transcript content")]
    NoContent,
    #[error("activity not found")]
    NotFound,
    #[error("generation: {0}")]
    Generation(LlmClientError),
    #[error("persistence: {0}")]
    Persistence(#[from] RepositoryError),
}
