use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use salamanca::application::ports::{ActivityRepository, LlmClient, LlmClientError};
use salamanca::application::services::{ActivityService, ActivityServiceError};
use salamanca::domain::{Embedding, RoomId, TranscriptChunk};
use salamanca::infrastructure::persistence::{
    InMemoryActivityRepository, InMemoryTranscriptChunkRepository,
};

struct FixedLlmClient {
    response: String,
}

impl FixedLlmClient {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl LlmClient for FixedLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.response.clone())
    }
}

const QUIZ_JSON: &str = r#"```json
{
  "title": "Cell biology check",
  "description": "Quick review",
  "timeLimit": 10,
  "questions": [
    {
      "id": 1,
      "question": "What organelle produces ATP?",
      "alternatives": [
        {"id": "A", "text": "Mitochondria"},
        {"id": "B", "text": "Ribosome"},
        {"id": "C", "text": "Nucleus"},
        {"id": "D", "text": "Golgi apparatus"}
      ],
      "correctAnswer": "A",
      "explanation": "ATP synthesis happens in the mitochondria."
    },
    {
      "id": 2,
      "question": "Where does translation occur?",
      "alternatives": [
        {"id": "A", "text": "Nucleus"},
        {"id": "B", "text": "Ribosome"},
        {"id": "C", "text": "Lysosome"},
        {"id": "D", "text": "Vacuole"}
      ],
      "correctAnswer": "B",
      "explanation": "Ribosomes translate mRNA into protein."
    }
  ]
}
```"#;

async fn seeded_chunks(room_id: RoomId) -> Arc<InMemoryTranscriptChunkRepository> {
    use salamanca::application::ports::TranscriptChunkRepository;

    let chunks = Arc::new(InMemoryTranscriptChunkRepository::new());
    chunks
        .insert(&TranscriptChunk::new(
            room_id,
            "Today we talked about the cell and its organelles.".to_string(),
            Embedding::new(vec![0.1; 768]),
        ))
        .await
        .unwrap();
    chunks
}

#[tokio::test]
async fn given_fenced_quiz_json_when_generating_then_persists_parsed_activity() {
    let room_id = RoomId::new();
    let chunks = seeded_chunks(room_id).await;
    let activities = Arc::new(InMemoryActivityRepository::new());

    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new(QUIZ_JSON)),
        chunks,
        Arc::clone(&activities) as Arc<dyn ActivityRepository>,
    );

    let activity = service.generate(room_id).await.unwrap();

    assert_eq!(activity.title, "Cell biology check");
    assert_eq!(activity.total_questions(), 2);
    assert_eq!(activity.time_limit_minutes, Some(10));
    assert_eq!(activity.questions[0].correct_answer, "A");

    let stored = activities.get(activity.id).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn given_malformed_quiz_response_when_generating_then_uses_stub_activity() {
    let room_id = RoomId::new();
    let chunks = seeded_chunks(room_id).await;
    let activities = Arc::new(InMemoryActivityRepository::new());

    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new("I'd be happy to help with a quiz!")),
        chunks,
        Arc::clone(&activities) as Arc<dyn ActivityRepository>,
    );

    let activity = service.generate(room_id).await.unwrap();

    assert_eq!(activity.total_questions(), 1);
    assert_eq!(activity.questions[0].correct_answer, "A");
}

#[tokio::test]
async fn given_room_without_chunks_when_generating_then_returns_no_content() {
    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new(QUIZ_JSON)),
        Arc::new(InMemoryTranscriptChunkRepository::new()),
        Arc::new(InMemoryActivityRepository::new()),
    );

    let error = service.generate(RoomId::new()).await.unwrap_err();

    assert!(matches!(error, ActivityServiceError::NoContent));
}

#[tokio::test]
async fn given_partial_answers_when_submitting_then_scores_and_persists_attempt() {
    let room_id = RoomId::new();
    let chunks = seeded_chunks(room_id).await;
    let activities = Arc::new(InMemoryActivityRepository::new());

    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new(QUIZ_JSON)),
        chunks,
        Arc::clone(&activities) as Arc<dyn ActivityRepository>,
    );

    let activity = service.generate(room_id).await.unwrap();

    // Question 1 answered correctly, question 2 left unanswered.
    let mut answers = HashMap::new();
    answers.insert("1".to_string(), "A".to_string());

    let result = service
        .submit(activity.id, "Ada".to_string(), answers)
        .await
        .unwrap();

    assert_eq!(result.score, 1);
    assert_eq!(result.total_questions, 2);
    assert_eq!(result.percentage, 50);
    assert!(result.results[0].is_correct);
    assert!(!result.results[1].is_correct);
    assert_eq!(result.results[1].user_answer, None);

    let attempts = activities.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].participant, "Ada");
    assert_eq!(attempts[0].score, 1);
}

#[tokio::test]
async fn given_wrong_answers_when_submitting_then_scores_zero() {
    let room_id = RoomId::new();
    let chunks = seeded_chunks(room_id).await;
    let activities = Arc::new(InMemoryActivityRepository::new());

    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new(QUIZ_JSON)),
        chunks,
        Arc::clone(&activities) as Arc<dyn ActivityRepository>,
    );

    let activity = service.generate(room_id).await.unwrap();

    let mut answers = HashMap::new();
    answers.insert("1".to_string(), "D".to_string());
    answers.insert("2".to_string(), "C".to_string());

    let result = service
        .submit(activity.id, "Grace".to_string(), answers)
        .await
        .unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.percentage, 0);
}

#[tokio::test]
async fn given_unknown_activity_when_submitting_then_returns_not_found() {
    let service = ActivityService::new(
        Arc::new(FixedLlmClient::new(QUIZ_JSON)),
        Arc::new(InMemoryTranscriptChunkRepository::new()),
        Arc::new(InMemoryActivityRepository::new()),
    );

    let error = service
        .submit(
            salamanca::domain::ActivityId::new(),
            "Ada".to_string(),
            HashMap::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ActivityServiceError::NotFound));
}
