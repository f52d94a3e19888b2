use std::sync::Arc;
use std::time::Duration;

use vibely_core::panel::{Effect, PanelEvent};
use vibely_core::{Clock, CollaboratorFailure};

use crate::collaborators::{AnswerJudge, QuizGenerator};
use crate::config::DEFAULT_TIMEOUT;
use crate::error::GenerationError;

/// Runs the collaborator round trips the panel asks for.
///
/// Every call is bounded by `timeout`; failures and timeouts come back as
/// `CollaboratorFailure` so the panel can render or grade them.
#[derive(Clone)]
pub struct PanelService {
    clock: Clock,
    timeout: Duration,
    generator: Arc<dyn QuizGenerator>,
    judge: Arc<dyn AnswerJudge>,
}

impl PanelService {
    #[must_use]
    pub fn new(
        clock: Clock,
        generator: Arc<dyn QuizGenerator>,
        judge: Arc<dyn AnswerJudge>,
    ) -> Self {
        Self {
            clock,
            timeout: DEFAULT_TIMEOUT,
            generator,
            judge,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform the round trip described by `effect`, if it describes one.
    ///
    /// Returns the event to feed back into the panel.
    pub async fn perform(&self, effect: &Effect) -> Option<PanelEvent> {
        match effect {
            Effect::RequestGeneration { request, prompt } => {
                tracing::info!(request = %request, "generating quiz");
                let result = self.bounded(self.generator.generate(prompt)).await;
                if let Err(failure) = &result {
                    tracing::warn!(request = %request, error = %failure, "generation failed");
                }
                Some(PanelEvent::GenerationFinished {
                    request: *request,
                    result,
                })
            }
            Effect::RequestJudgment(request) => {
                tracing::info!(
                    question = %request.question_id,
                    token = %request.token,
                    "judging answer"
                );
                let result = self.bounded(self.judge.judge(request)).await;
                Some(PanelEvent::JudgmentFinished {
                    session_id: request.session_id,
                    question_id: request.question_id.clone(),
                    token: request.token,
                    result,
                })
            }
            _ => None,
        }
    }

    async fn bounded(
        &self,
        call: impl Future<Output = Result<String, GenerationError>>,
    ) -> Result<String, CollaboratorFailure> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(GenerationError::Timeout(self.timeout).into()),
        }
    }
}
