use std::sync::Arc;

use crate::application::ports::{
    LlmClient, LlmClientError, RepositoryError, TranscriptChunkRepository,
};
use crate::domain::RoomId;

/// AI assistance for the freeform note a room carries: text continuation
/// grounded in the room's transcriptions, and study summaries.
pub struct NoteService {
    llm_client: Arc<dyn LlmClient>,
    chunk_repository: Arc<dyn TranscriptChunkRepository>,
}

#[derive(Debug)]
pub struct Continuation {
    pub text: String,
    pub has_context: bool,
}

impl NoteService {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        chunk_repository: Arc<dyn TranscriptChunkRepository>,
    ) -> Self {
        Self {
            llm_client,
            chunk_repository,
        }
    }

    #[tracing::instrument(skip(self, text), fields(room_id = %room_id.as_uuid()))]
    pub async fn continue_text(
        &self,
        room_id: RoomId,
        text: &str,
    ) -> Result<Continuation, NoteServiceError> {
        let chunks = self.chunk_repository.list_by_room(room_id).await?;

        let context = chunks
            .iter()
            .map(|c| c.transcription.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        let has_context = !context.is_empty();

        let prompt = if has_context {
            format!(
                "Study room context (audio transcriptions):\n{}\n\n\
Current text written by the user:\n{}\n\n\
Based on the room context and what the user is writing, suggest a natural, \
relevant continuation of the text. Keep it concise (1-3 sentences) and make \
it fit directly after the current text. Respond with the continuation only.",
                context, text
            )
        } else {
            format!(
                "Current text:\n{}\n\n\
Suggest a natural, concise continuation (1-3 sentences) for this text. \
Respond with the continuation only.",
                text
            )
        };

        let continuation = self.llm_client.generate(&prompt).await?;

        Ok(Continuation {
            text: continuation,
            has_context,
        })
    }

    #[tracing::instrument(skip(self, content))]
    pub async fn summarize(&self, content: &str) -> Result<String, NoteServiceError> {
        let prompt = format!(
            "You are a specialist in clear, structured study summaries.\n\n\
CONTENT TO SUMMARIZE:\n{}\n\n\
INSTRUCTIONS:\n\
1. Identify the key points and core concepts\n\
2. Organize the summary with markdown headings and bullet points\n\
3. Keep the language clear and objective, 200-400 words\n\n\
Expected shape:\n# Summary\n\n## Key Concepts\n- concept: short explanation\n\n\
## Important Points\n- relevant point\n\n## Conclusion\nFinal synthesis\n\n\
Write the summary:",
            content
        );

        let summary = self.llm_client.generate(&prompt).await?;
        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("generation: {0}")]
    Generation(#[from] LlmClientError),
    #[error("persistence: {0}")]
    Persistence(#[from] RepositoryError),
}
