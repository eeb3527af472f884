//! Anthropic Messages API client (non-streaming, single turn).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, Result};

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"];

/// Anthropic API version header.
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicClient {
    http: Client,
    messages_url: Url,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(http: &Client, base: &Url, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: http.clone(),
            messages_url: base.join("v1/messages")?,
            api_key: api_key.into(),
        })
    }

    /// Send one request and return the text of the first text block.
    pub async fn create_message(&self, request: &MessagesRequest) -> Result<String> {
        let resp = self
            .http
            .post(self.messages_url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CoreError::api("Anthropic", status.as_u16(), &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| CoreError::Api {
                service: "Anthropic".to_string(),
                status: status.as_u16(),
                message: "response contained no text content".to_string(),
            })
    }
}
