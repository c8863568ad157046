use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub struct MockEmbedder;

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Embedding::new(vec![0.1; 768]))
    }
}
