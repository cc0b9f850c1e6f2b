//! Completion relay: forwards a prompt to the OpenAI chat completions API.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::types::MessageRole;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const MAX_TOKENS: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub model: String,
}

impl CompletionRequest {
    /// Build the fixed system + user request for a single prompt.
    #[must_use]
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                Message {
                    role: MessageRole::User,
                    content: Some(prompt.to_string()),
                },
            ],
            max_tokens: MAX_TOKENS,
            model: MODEL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Parse a completions response body into the trimmed text of its first choice.
pub fn parse_completion(body: &str) -> Result<String> {
    let response: CompletionResponse = serde_json::from_str(body)?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BotError::CompletionResponse("No choices in response".to_string()))?;

    Ok(choice
        .message
        .content
        .map(|text| text.trim().to_string())
        .unwrap_or_default())
}

pub struct OpenAiClient {
    api_token: String,
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api_token: String) -> Self {
        Self::with_endpoint(api_token, OPENAI_API_URL.to_string())
    }

    #[must_use]
    pub fn with_endpoint(api_token: String, endpoint: String) -> Self {
        Self {
            api_token,
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Send `prompt` to the completions endpoint and return the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Sending completion request with prompt: {prompt}");

        let request = CompletionRequest::for_prompt(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Status code: {status}");
        debug!("Response body: {body}");

        if !status.is_success() {
            return Err(BotError::CompletionApi {
                status,
                message: body,
            });
        }

        parse_completion(&body)
    }
}
