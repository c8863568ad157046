use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, QuestionRepository, RepositoryError,
    ScoredChunk, TranscriptChunkRepository,
};
use crate::domain::{Embedding, Question, QuestionId, RoomId};

/// Returned to the user when retrieval and the recency fallback both come up
/// empty. A legitimate answer, not a failure: it is persisted like any other.
pub const INSUFFICIENT_CONTENT_ANSWER: &str = "Sorry, there is not enough audio \
content in this room to answer your question. Please upload some audio \
recordings first.";

/// Knobs of the adaptive retrieval cascade. The threshold ladder and the two
/// result caps are inherited constants with no documented derivation; they
/// are configuration, not values to re-derive.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub thresholds: Vec<f32>,
    pub top_k: usize,
    pub recent_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![0.5, 0.4, 0.3, 0.2],
            top_k: 5,
            recent_limit: 3,
        }
    }
}

/// Outcome of the threshold cascade.
#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    Found {
        chunks: Vec<ScoredChunk>,
        threshold: f32,
    },
    NotFound,
}

/// How the persisted answer was grounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerGrounding {
    /// Chunks cleared one of the similarity thresholds.
    Similarity { threshold: f32 },
    /// Nothing cleared the ladder; the most recent chunks were used instead.
    Recency,
    /// The room has no chunks at all; the fixed message was persisted.
    NoContent,
}

#[derive(Debug)]
pub struct AskResult {
    pub question_id: QuestionId,
    pub answer: String,
    pub grounding: AnswerGrounding,
}

pub struct QuestionService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    chunk_repository: Arc<dyn TranscriptChunkRepository>,
    question_repository: Arc<dyn QuestionRepository>,
    config: RetrievalConfig,
}

impl QuestionService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        chunk_repository: Arc<dyn TranscriptChunkRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            chunk_repository,
            question_repository,
            config,
        }
    }

    /// Runs the full pipeline: embed the question, retrieve context through
    /// the threshold cascade (falling back to recency, then to the fixed
    /// message), synthesize an answer, persist the question.
    #[tracing::instrument(skip(self, question), fields(room_id = %room_id.as_uuid()))]
    pub async fn ask(
        &self,
        room_id: RoomId,
        question: &str,
    ) -> Result<AskResult, QuestionServiceError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(QuestionServiceError::Embedding)?;

        let outcome = self.retrieve(room_id, &query_embedding).await?;

        let (answer, grounding) = match outcome {
            RetrievalOutcome::Found { chunks, threshold } => {
                tracing::debug!(
                    chunk_count = chunks.len(),
                    threshold = threshold,
                    "Retrieved chunks above similarity threshold"
                );
                let transcriptions: Vec<String> =
                    chunks.into_iter().map(|c| c.transcription).collect();
                let answer = self.synthesize(question, &transcriptions).await?;
                (answer, AnswerGrounding::Similarity { threshold })
            }
            RetrievalOutcome::NotFound => {
                let recent = self
                    .chunk_repository
                    .query_recent(room_id, self.config.recent_limit)
                    .await
                    .map_err(QuestionServiceError::Persistence)?;

                if recent.is_empty() {
                    tracing::debug!("Room has no transcript chunks, using fixed answer");
                    (INSUFFICIENT_CONTENT_ANSWER.to_string(), AnswerGrounding::NoContent)
                } else {
                    tracing::debug!(
                        chunk_count = recent.len(),
                        "No chunk cleared the threshold ladder, falling back to recency"
                    );
                    let answer = self.synthesize(question, &recent).await?;
                    (answer, AnswerGrounding::Recency)
                }
            }
        };

        let record = Question {
            id: QuestionId::new(),
            room_id,
            question: question.to_string(),
            answer: Some(answer.clone()),
            created_at: chrono::Utc::now(),
        };

        let question_id = self
            .question_repository
            .insert(&record)
            .await
            .map_err(QuestionServiceError::Persistence)?;

        Ok(AskResult {
            question_id,
            answer,
            grounding,
        })
    }

    /// Walks the threshold ladder in its literal order and stops at the
    /// first threshold that admits at least one chunk. The comparison is
    /// strictly greater-than at every rung.
    pub async fn retrieve(
        &self,
        room_id: RoomId,
        query_embedding: &Embedding,
    ) -> Result<RetrievalOutcome, QuestionServiceError> {
        for &threshold in &self.config.thresholds {
            let chunks = self
                .chunk_repository
                .query_by_similarity(room_id, query_embedding, threshold, self.config.top_k)
                .await
                .map_err(QuestionServiceError::Persistence)?;

            if !chunks.is_empty() {
                return Ok(RetrievalOutcome::Found { chunks, threshold });
            }
        }

        Ok(RetrievalOutcome::NotFound)
    }

    async fn synthesize(
        &self,
        question: &str,
        transcriptions: &[String],
    ) -> Result<String, QuestionServiceError> {
        let prompt = build_answer_prompt(question, transcriptions);

        let answer = self
            .llm_client
            .generate(&prompt)
            .await
            .map_err(QuestionServiceError::Generation)?;

        if answer.trim().is_empty() {
            return Err(QuestionServiceError::Generation(
                LlmClientError::InvalidResponse("empty completion".to_string()),
            ));
        }

        Ok(answer)
    }
}

fn build_answer_prompt(question: &str, transcriptions: &[String]) -> String {
    let mut prompt = String::from(
        "You are a study assistant helping a student review a recorded lesson. \
Answer the question using only the lecture transcript excerpts below.\n\n\
TRANSCRIPT EXCERPTS:\n",
    );

    for (i, transcription) in transcriptions.iter().enumerate() {
        prompt.push_str(&format!("[{}] {}\n\n", i + 1, transcription));
    }

    prompt.push_str(&format!(
        "QUESTION: {}\n\n\
Explain the answer clearly and didactically, grounded in the excerpts. \
If the excerpts only partially cover the question, say what is missing.",
        question
    ));

    prompt
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionServiceError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("generation: {0}")]
    Generation(LlmClientError),
    #[error("persistence: {0}")]
    Persistence(RepositoryError),
}
