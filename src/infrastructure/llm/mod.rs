mod gemini_client;
mod mock_embedder;
mod mock_llm_client;
mod mock_transcription_engine;

pub use gemini_client::GeminiClient;
pub use mock_embedder::MockEmbedder;
pub use mock_llm_client::MockLlmClient;
pub use mock_transcription_engine::MockTranscriptionEngine;
