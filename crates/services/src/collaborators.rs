use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vibely_core::gate::ImplementRequest;
use vibely_core::judgment::JudgeRequest;

use crate::error::{GenerationError, HostError};

/// Turns a prompt into the raw generator reply.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Ask for code plus questions for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the request cannot be completed.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Compares a free-response answer to its reference.
#[async_trait]
pub trait AnswerJudge: Send + Sync {
    /// Returns the raw reply, expected to be `correct` or `incorrect`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the request cannot be completed.
    async fn judge(&self, request: &JudgeRequest) -> Result<String, GenerationError>;
}

/// Receives the code once the user proceeds to implement it.
#[async_trait]
pub trait HostSink: Send + Sync {
    /// Hand the code to the host. Returns where it ended up, if anywhere.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the host cannot accept the code.
    async fn implement(&self, request: &ImplementRequest) -> Result<Option<PathBuf>, HostError>;
}

/// Scripted collaborators for tests and offline runs.
///
/// Replies are served in order; once the script runs out the fallback reply is
/// used. Every call is recorded.
#[derive(Clone, Default)]
pub struct ScriptedCollaborator {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    fallback: Option<String>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCollaborator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `reply`.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn then_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// Sleep before every reply.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Inputs seen so far: prompts for generation, user answers for judgments.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(&self, reply: Result<String, String>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    async fn answer(&self, input: &str) -> Result<String, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(input.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .replies
            .lock()
            .map_err(|err| GenerationError::Unavailable(err.to_string()))?
            .pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(GenerationError::Unavailable(message)),
            None => self.fallback.clone().ok_or(GenerationError::EmptyResponse),
        }
    }
}

#[async_trait]
impl QuizGenerator for ScriptedCollaborator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.answer(prompt).await
    }
}

#[async_trait]
impl AnswerJudge for ScriptedCollaborator {
    async fn judge(&self, request: &JudgeRequest) -> Result<String, GenerationError> {
        self.answer(&request.user_answer).await
    }
}

/// Host sink that keeps every request in memory.
#[derive(Clone, Default)]
pub struct RecordingHost {
    received: Arc<Mutex<Vec<ImplementRequest>>>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn received(&self) -> Vec<ImplementRequest> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HostSink for RecordingHost {
    async fn implement(&self, request: &ImplementRequest) -> Result<Option<PathBuf>, HostError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(request.clone());
        }
        Ok(None)
    }
}
