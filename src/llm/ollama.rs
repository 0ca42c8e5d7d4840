use crate::tools::capabilities::ChunkSummarizer;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};

const DEFAULT_PORT: u16 = 11434;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a research assistant. Summarize the text you are \
given as a short factual note of roughly 50 to 200 words. Reply with the note only, no preamble.";

/// Chunk summarizer backed by a local Ollama server.
pub struct OllamaSummarizer {
    client: Ollama,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(base_url: &str, model: impl Into<String>) -> Self {
        let (host, port) = split_base_url(base_url);
        Self {
            client: Ollama::new(host, port),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Split `scheme://host:port` into the `("scheme://host", port)` pair ollama-rs wants.
fn split_base_url(base_url: &str) -> (String, u16) {
    let base_url = base_url.trim().trim_end_matches('/');
    let (scheme, rest) = match base_url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", base_url),
    };
    if rest.is_empty() {
        return ("http://localhost".to_string(), DEFAULT_PORT);
    }

    match rest.rsplit_once(':') {
        Some((host, port)) => (
            format!("{}://{}", scheme, host),
            port.parse().unwrap_or(DEFAULT_PORT),
        ),
        None => (format!("{}://{}", scheme, rest), DEFAULT_PORT),
    }
}

#[async_trait]
impl ChunkSummarizer for OllamaSummarizer {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn summarize_chunk(&self, chunk: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(SUMMARY_SYSTEM_PROMPT.to_string()),
            ChatMessage::user(chunk.to_string()),
        ];

        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::external("summarize", format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_base_url() {
        assert_eq!(
            split_base_url("http://localhost:11434"),
            ("http://localhost".to_string(), 11434)
        );
        assert_eq!(
            split_base_url("https://gpu-box:8080/"),
            ("https://gpu-box".to_string(), 8080)
        );
        assert_eq!(
            split_base_url("ollama.internal"),
            ("http://ollama.internal".to_string(), DEFAULT_PORT)
        );
        assert_eq!(split_base_url(""), ("http://localhost".to_string(), DEFAULT_PORT));
    }

    #[test]
    fn test_bad_port_falls_back() {
        assert_eq!(split_base_url("http://host:abc").1, DEFAULT_PORT);
    }

    #[test]
    fn test_model_name() {
        let summarizer = OllamaSummarizer::new("http://localhost:11434", "llama3.2");
        assert_eq!(summarizer.model(), "llama3.2");
        assert_eq!(summarizer.name(), "ollama");
    }
}
