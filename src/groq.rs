//! Client for the Groq chat-completions API (OpenAI-compatible).

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{ChatError, ChatResult};

/// The models the picker offers. Groq serves more, but these are the ones
/// this client is tested against.
pub const MODELS: &[&str] = &["llama3-8b-8192", "qwen-2.5-32b"];

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Deserialize)]
struct GroqResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, GROQ_API_URL)
    }

    /// Same client against a different endpoint; used by tests to point at
    /// a mock server.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends `prompt` as the sole message of a chat-completion request and
    /// returns the reply text. Each call is stateless: no prior turns are
    /// included.
    pub async fn chat(&self, model: &str, prompt: &str, temperature: f32) -> ChatResult<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = GroqRequest {
            model: model.to_string(),
            messages: vec![GroqMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api { status, body });
        }

        let parsed: GroqResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Malformed("response contained no choices".to_string()))
    }
}
