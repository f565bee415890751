//! Groq backend implementation.
//!
//! Groq serves an OpenAI-dialect chat completions endpoint. Sampling is
//! pinned to temperature zero so the same request yields the same command.

use crate::config::Config;
use crate::error::TellError;
use crate::llm::{ChatApi, ChatMessage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq client holding the resolved credential.
#[derive(Debug)]
pub struct GroqClient {
    model: String,
    max_tokens: u32,
    api_key: String,
    client: Client,
}

impl GroqClient {
    /// Create a client, resolving the API key up front. A missing key is a
    /// startup failure, not a first-use surprise: the config file is
    /// consulted first, then the GROQ_API_KEY environment variable.
    pub fn new(config: &Config) -> Result<Self, TellError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .ok_or(TellError::MissingCredential)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl ChatApi for GroqClient {
    async fn send(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = GroqRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.max_tokens,
            temperature: 0.0,
            stream: false,
        };

        debug!(model = %self.model, messages = messages.len(), "sending chat request");

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TellError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Result<GroqError, _> = response.json().await;
            let message = body
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TellError::Transport(format!("status {}: {}", status, message)).into());
        }

        let groq_response: GroqResponse = response
            .json()
            .await
            .context("Failed to parse Groq response")?;

        let text = groq_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| TellError::Transport("no choices in response".to_string()))?;

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqMessageResponse,
}

#[derive(Debug, Deserialize)]
struct GroqMessageResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
}
