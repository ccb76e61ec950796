use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ReviewError;

/// Seam to the text-generation collaborator.
#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ReviewError>;
}

#[derive(Serialize)]
pub struct OllamaRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct OllamaResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

#[derive(Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}

/// Provider-backed generation client. Supports deepseek (OpenAI-style chat
/// completions) and ollama (local generate endpoint, no key).
pub struct AiClient {
    client: Client,
    provider: String,
    model: String,
    deepseek_url: String,
    deepseek_api_key: Option<String>,
    ollama_url: String,
}

impl AiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            provider: config.provider.clone(),
            model: config.model.clone(),
            deepseek_url: config.deepseek_url.clone(),
            deepseek_api_key: config.deepseek_api_key.clone(),
            ollama_url: config.ollama_url.clone(),
        }
    }

    async fn call_deepseek(&self, prompt: &str) -> Result<String, ReviewError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };
        let api_key = self.deepseek_api_key.clone().unwrap_or_default();

        let response = self
            .client
            .post(&self.deepseek_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewError::ai_service("deepseek", format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ReviewError::ai_service(
                "deepseek",
                format!("HTTP error: {}", response.status()),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::ai_service("deepseek", format!("invalid response: {}", e)))?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        Ok(content.to_string())
    }

    async fn call_ollama(&self, prompt: &str) -> Result<String, ReviewError> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.ollama_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewError::ai_service("ollama", format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ReviewError::ai_service(
                "ollama",
                format!("HTTP error: {}", response.status()),
            ));
        }

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::ai_service("ollama", format!("invalid response: {}", e)))?;
        Ok(body.response.trim().to_string())
    }
}

#[async_trait]
impl ReviewGenerator for AiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ReviewError> {
        tracing::debug!(
            provider = self.provider.as_str(),
            model = self.model.as_str(),
            prompt_len = prompt.len(),
            "calling generation service"
        );
        match self.provider.as_str() {
            "deepseek" => self.call_deepseek(prompt).await,
            // Default ollama
            _ => self.call_ollama(prompt).await,
        }
    }
}
