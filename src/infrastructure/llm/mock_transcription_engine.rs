use crate::application::ports::{TranscriptionEngine, TranscriptionError};

pub struct MockTranscriptionEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _mime_type: &str,
    ) -> Result<String, TranscriptionError> {
        Ok("Mock transcription of the uploaded recording.".to_string())
    }
}
