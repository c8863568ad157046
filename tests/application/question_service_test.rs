use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;

use salamanca::application::ports::{
    ChunkSummary, Embedder, EmbedderError, LlmClient, LlmClientError, QuestionRepository,
    RepositoryError, ScoredChunk, TranscriptChunkRepository,
};
use salamanca::application::services::{
    AnswerGrounding, INSUFFICIENT_CONTENT_ANSWER, QuestionService, QuestionServiceError,
    RetrievalConfig, RetrievalOutcome,
};
use salamanca::domain::{ChunkId, Embedding, RoomId, TranscriptChunk};
use salamanca::infrastructure::persistence::InMemoryQuestionRepository;

/// Chunk repository with preset similarity scores, so the threshold cascade
/// can be exercised at exact boundary values without floating-point fuzz.
/// Chunks are stored oldest first.
struct ScriptedChunkRepository {
    chunks: Vec<(String, f32)>,
}

impl ScriptedChunkRepository {
    fn new(chunks: Vec<(&str, f32)>) -> Self {
        Self {
            chunks: chunks
                .into_iter()
                .map(|(t, s)| (t.to_string(), s))
                .collect(),
        }
    }
}

#[async_trait]
impl TranscriptChunkRepository for ScriptedChunkRepository {
    async fn insert(&self, _chunk: &TranscriptChunk) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn query_by_similarity(
        &self,
        _room_id: RoomId,
        _embedding: &Embedding,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<ScoredChunk>, RepositoryError> {
        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .filter(|(_, score)| *score > threshold)
            .map(|(transcription, score)| ScoredChunk {
                id: ChunkId::new(),
                transcription: transcription.clone(),
                similarity: *score,
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }

    async fn query_recent(
        &self,
        _room_id: RoomId,
        limit: usize,
    ) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .chunks
            .iter()
            .rev()
            .take(limit)
            .map(|(t, _)| t.clone())
            .collect())
    }

    async fn list_by_room(&self, _room_id: RoomId) -> Result<Vec<ChunkSummary>, RepositoryError> {
        Ok(self
            .chunks
            .iter()
            .map(|(t, _)| ChunkSummary {
                id: ChunkId::new(),
                transcription: t.clone(),
                created_at: chrono::Utc::now(),
            })
            .collect())
    }
}

struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Embedding::new(vec![1.0, 0.0]))
    }
}

struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::ApiRequestFailed("unreachable".to_string()))
    }
}

struct RecordingLlmClient {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    response: String,
}

impl RecordingLlmClient {
    fn new(response: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            response: response.to_string(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for RecordingLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.response.clone())
    }
}

fn service_with(
    chunks: Vec<(&str, f32)>,
    llm: Arc<RecordingLlmClient>,
) -> (QuestionService, Arc<InMemoryQuestionRepository>) {
    let questions = Arc::new(InMemoryQuestionRepository::new());

    let service = QuestionService::new(
        Arc::new(FixedEmbedder),
        llm,
        Arc::new(ScriptedChunkRepository::new(chunks)),
        Arc::clone(&questions) as Arc<dyn QuestionRepository>,
        RetrievalConfig::default(),
    );

    (service, questions)
}

#[tokio::test]
async fn given_chunk_above_first_threshold_when_asking_then_grounds_at_half() {
    let llm = Arc::new(RecordingLlmClient::new("The lesson covers photosynthesis."));
    let (service, questions) = service_with(vec![("photosynthesis overview", 0.55)], llm.clone());

    let result = service
        .ask(RoomId::new(), "What is the lesson about?")
        .await
        .unwrap();

    assert_eq!(
        result.grounding,
        AnswerGrounding::Similarity { threshold: 0.5 }
    );
    assert_eq!(result.answer, "The lesson covers photosynthesis.");
    assert_eq!(llm.call_count(), 1);

    let stored = questions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].question, "What is the lesson about?");
    assert_eq!(
        stored[0].answer.as_deref(),
        Some("The lesson covers photosynthesis.")
    );
}

#[tokio::test]
async fn given_low_scoring_chunk_when_asking_then_relaxes_to_last_threshold() {
    let llm = Arc::new(RecordingLlmClient::new("A loosely related answer."));
    let (service, _questions) = service_with(vec![("tangential aside", 0.25)], llm);

    let result = service.ask(RoomId::new(), "What was said?").await.unwrap();

    assert_eq!(
        result.grounding,
        AnswerGrounding::Similarity { threshold: 0.2 }
    );
}

#[tokio::test]
async fn given_each_score_band_when_retrieving_then_stops_at_matching_threshold() {
    for (score, expected_threshold) in [(0.55, 0.5), (0.45, 0.4), (0.35, 0.3), (0.25, 0.2)] {
        let llm = Arc::new(RecordingLlmClient::new("answer"));
        let (service, _) = service_with(vec![("chunk", score)], llm);

        let outcome = service
            .retrieve(RoomId::new(), &Embedding::new(vec![1.0, 0.0]))
            .await
            .unwrap();

        match outcome {
            RetrievalOutcome::Found { threshold, chunks } => {
                assert_eq!(threshold, expected_threshold);
                assert_eq!(chunks.len(), 1);
            }
            RetrievalOutcome::NotFound => panic!("expected a match for score {}", score),
        }
    }
}

#[tokio::test]
async fn given_many_matches_when_retrieving_then_caps_at_five_sorted_descending() {
    let llm = Arc::new(RecordingLlmClient::new("answer"));
    let (service, _) = service_with(
        vec![
            ("a", 0.82),
            ("b", 0.92),
            ("c", 0.86),
            ("d", 0.6),
            ("e", 0.9),
            ("f", 0.84),
            ("g", 0.88),
        ],
        llm,
    );

    let outcome = service
        .retrieve(RoomId::new(), &Embedding::new(vec![1.0, 0.0]))
        .await
        .unwrap();

    let RetrievalOutcome::Found { chunks, threshold } = outcome else {
        panic!("expected a match");
    };

    assert_eq!(threshold, 0.5);
    assert_eq!(chunks.len(), 5);
    for pair in chunks.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert_eq!(chunks[0].transcription, "b");
    assert!(chunks.iter().all(|c| c.similarity > 0.5));
}

#[tokio::test]
async fn given_chunk_at_exact_cutoff_when_asking_then_falls_back_to_recency() {
    // 0.2 > 0.2 is false: the comparison is strict at every rung, so the
    // chunk is excluded from the cascade but still reachable via recency.
    let llm = Arc::new(RecordingLlmClient::new("Answer from the recent chunk."));
    let (service, questions) = service_with(vec![("boundary chunk", 0.2)], llm.clone());

    let result = service.ask(RoomId::new(), "Anything?").await.unwrap();

    assert_eq!(result.grounding, AnswerGrounding::Recency);
    assert_eq!(llm.call_count(), 1);
    assert!(llm.last_prompt().unwrap().contains("boundary chunk"));

    let stored = questions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0].answer.as_deref(),
        Some("Answer from the recent chunk.")
    );
}

#[tokio::test]
async fn given_only_weak_chunks_when_asking_then_uses_three_most_recent() {
    let llm = Arc::new(RecordingLlmClient::new("Recency-grounded answer."));
    let (service, _) = service_with(
        vec![
            ("oldest", 0.05),
            ("older", 0.1),
            ("newer", 0.15),
            ("newest", 0.18),
        ],
        llm.clone(),
    );

    let result = service.ask(RoomId::new(), "What now?").await.unwrap();

    assert_eq!(result.grounding, AnswerGrounding::Recency);

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("newest"));
    assert!(prompt.contains("newer"));
    assert!(prompt.contains("older"));
    assert!(!prompt.contains("oldest"));
}

#[tokio::test]
async fn given_empty_room_when_asking_then_persists_fixed_answer_without_provider_call() {
    let llm = Arc::new(RecordingLlmClient::new("should never be used"));
    let (service, questions) = service_with(vec![], llm.clone());

    let result = service
        .ask(RoomId::new(), "Is anyone there?")
        .await
        .unwrap();

    assert_eq!(result.grounding, AnswerGrounding::NoContent);
    assert_eq!(result.answer, INSUFFICIENT_CONTENT_ANSWER);
    assert_eq!(llm.call_count(), 0);

    let stored = questions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].question, "Is anyone there?");
    assert_eq!(stored[0].answer.as_deref(), Some(INSUFFICIENT_CONTENT_ANSWER));
}

#[tokio::test]
async fn given_failing_embedder_when_asking_then_nothing_is_persisted() {
    let llm = Arc::new(RecordingLlmClient::new("unused"));
    let questions = Arc::new(InMemoryQuestionRepository::new());

    let service = QuestionService::new(
        Arc::new(FailingEmbedder),
        llm.clone(),
        Arc::new(ScriptedChunkRepository::new(vec![("chunk", 0.9)])),
        Arc::clone(&questions) as Arc<dyn QuestionRepository>,
        RetrievalConfig::default(),
    );

    let error = service.ask(RoomId::new(), "Hello?").await.unwrap_err();

    assert!(matches!(error, QuestionServiceError::Embedding(_)));
    assert_eq!(llm.call_count(), 0);
    assert!(questions.all().is_empty());
}

#[tokio::test]
async fn given_empty_completion_when_asking_then_fails_without_persisting() {
    let llm = Arc::new(RecordingLlmClient::new("   "));
    let (service, questions) = service_with(vec![("relevant chunk", 0.7)], llm);

    let error = service.ask(RoomId::new(), "Question?").await.unwrap_err();

    assert!(matches!(error, QuestionServiceError::Generation(_)));
    assert!(questions.all().is_empty());
}
