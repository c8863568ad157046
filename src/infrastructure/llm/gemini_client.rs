use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::Embedding;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const TRANSCRIPTION_INSTRUCTION: &str = "Transcribe the audio for me, without \
leaving anything out and without inventing anything extra. Transcribe clearly \
and objectively.";

/// Adapter for the Gemini REST API, backing all three provider ports:
/// text generation, embeddings and audio transcription.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    generation_model: String,
    embedding_model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, generation_model: String, embedding_model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            generation_model,
            embedding_model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    async fn generate_content(&self, parts: Vec<Part>) -> Result<String, GeminiHttpError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.generation_model
        );

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        let response = self.post_json(&url, &body).await?;

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiHttpError::InvalidBody(e.to_string()))?;

        let text = generate_response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<String>();

        if text.is_empty() {
            return Err(GeminiHttpError::InvalidBody(
                "no text in candidates".to_string(),
            ));
        }

        Ok(text)
    }

    async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, GeminiHttpError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiHttpError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiHttpError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiHttpError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.generate_content(vec![Part::text(prompt)])
            .await
            .map_err(|e| match e {
                GeminiHttpError::RateLimited => LlmClientError::RateLimited,
                GeminiHttpError::RequestFailed(msg) => LlmClientError::ApiRequestFailed(msg),
                GeminiHttpError::InvalidBody(msg) => LlmClientError::InvalidResponse(msg),
            })
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        let url = format!(
            "{}/models/{}:embedContent",
            self.base_url, self.embedding_model
        );

        let body = EmbedRequest {
            content: EmbedContent {
                parts: vec![Part::text(text)],
            },
            task_type: "RETRIEVAL_DOCUMENT",
        };

        let response = self.post_json(&url, &body).await.map_err(|e| match e {
            GeminiHttpError::RateLimited => EmbedderError::RateLimited,
            GeminiHttpError::RequestFailed(msg) => EmbedderError::ApiRequestFailed(msg),
            GeminiHttpError::InvalidBody(msg) => EmbedderError::InvalidResponse(msg),
        })?;

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbedderError::InvalidResponse(e.to_string()))?;

        let values = embed_response
            .embedding
            .map(|e| e.values)
            .unwrap_or_default();

        if values.is_empty() {
            return Err(EmbedderError::InvalidResponse(
                "empty embedding".to_string(),
            ));
        }

        Ok(Embedding::new(values))
    }
}

#[async_trait]
impl TranscriptionEngine for GeminiClient {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        mime_type: &str,
    ) -> Result<String, TranscriptionError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(audio_data);

        let parts = vec![
            Part::text(TRANSCRIPTION_INSTRUCTION),
            Part::inline_data(mime_type, encoded),
        ];

        self.generate_content(parts).await.map_err(|e| match e {
            GeminiHttpError::RateLimited => {
                TranscriptionError::ApiRequestFailed("rate limited".to_string())
            }
            GeminiHttpError::RequestFailed(msg) => TranscriptionError::ApiRequestFailed(msg),
            GeminiHttpError::InvalidBody(msg) => TranscriptionError::TranscriptionFailed(msg),
        })
    }
}

#[derive(Debug)]
enum GeminiHttpError {
    RequestFailed(String),
    RateLimited,
    InvalidBody(String),
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct EmbedRequest {
    content: EmbedContent,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(Serialize)]
struct EmbedContent {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}
