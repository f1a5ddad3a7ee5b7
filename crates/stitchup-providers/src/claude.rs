//! Claude vision/text client for scene analysis and lyric composition.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};
use crate::payload;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude client configuration.
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.anthropic.com".to_string(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 4000,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<Block<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Block<'a> {
    Text { text: &'a str },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the Anthropic messages API.
pub struct ClaudeClient {
    config: ClaudeConfig,
    http: Client,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> GenerationResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Send a prompt plus one inline image and return the response text.
    pub async fn describe_image(&self, prompt: &str, image: &[u8]) -> GenerationResult<String> {
        let blocks = vec![
            Block::Text { text: prompt },
            Block::Image {
                source: ImageSource {
                    kind: "base64",
                    media_type: payload::detect_mime(image),
                    data: payload::base64_encode(image),
                },
            },
        ];
        self.send_messages(blocks).await
    }

    /// Send a text-only prompt and return the response text.
    pub async fn compose_text(&self, prompt: &str) -> GenerationResult<String> {
        self.send_messages(vec![Block::Text { text: prompt }]).await
    }

    async fn send_messages(&self, content: Vec<Block<'_>>) -> GenerationResult<String> {
        let url = format!("{}/v1/messages", self.config.api_base);
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content,
            }],
        };

        debug!(model = %self.config.model, "Sending Claude messages request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::provider(status.as_u16(), body));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::malformed(format!("Claude response: {e}")))?;

        let text = parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GenerationError::malformed("no text content in Claude response"))?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClaudeConfig::default();
        assert_eq!(config.api_base, "https://api.anthropic.com");
        assert_eq!(config.max_tokens, 4000);
    }

    #[test]
    fn test_image_block_serialization() {
        let block = Block::Image {
            source: ImageSource {
                kind: "base64",
                media_type: "image/png",
                data: "AAAA".to_string(),
            },
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["source"]["type"], "base64");
        assert_eq!(json["source"]["media_type"], "image/png");
    }
}
