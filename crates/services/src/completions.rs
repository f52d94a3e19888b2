use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use vibely_core::judgment::JudgeRequest;

use crate::collaborators::{AnswerJudge, QuizGenerator};
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::prompts::{
    GENERATION_SYSTEM_PROMPT, JUDGE_MAX_TOKENS, JUDGE_SYSTEM_PROMPT, judge_user_message,
};

/// OpenAI-compatible chat-completions client used for both generation and grading.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: GenerationConfig,
}

impl ChatCompletionsClient {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn try_new(config: GenerationConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Send one chat exchange and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when no API key is configured, the request
    /// fails, or the reply has no content.
    pub async fn complete(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let payload = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
            temperature: self.config.temperature,
        };

        tracing::debug!(model = %self.config.model, max_tokens, "sending chat completion");
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat completion rejected");
            return Err(GenerationError::HttpStatus { status, body });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl QuizGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.complete(
            GENERATION_SYSTEM_PROMPT,
            prompt.to_string(),
            self.config.max_tokens,
        )
        .await
    }
}

#[async_trait]
impl AnswerJudge for ChatCompletionsClient {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, GenerationError> {
        self.complete(
            JUDGE_SYSTEM_PROMPT,
            judge_user_message(request),
            JUDGE_MAX_TOKENS,
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
