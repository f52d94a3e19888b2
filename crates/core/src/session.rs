use chrono::{DateTime, Utc};

use crate::gate::{CompletionGate, GateError, ImplementRequest};
use crate::model::{Question, QuestionId, QuestionState, Quiz, RequestToken, SessionId};

/// Progress counters for the rendered quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
}

/// Explicit state of one rendered quiz.
///
/// Created fresh for every quiz the panel shows and dropped when the next prompt
/// replaces it, so no question state leaks between submissions. Grading and the
/// completion gate receive it by `&mut` from the panel that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    id: SessionId,
    quiz: Quiz,
    states: Vec<QuestionState>,
    next_token: RequestToken,
    gate: CompletionGate,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    #[must_use]
    pub fn new(quiz: Quiz, started_at: DateTime<Utc>) -> Self {
        let states = vec![QuestionState::new(); quiz.len()];
        Self {
            id: SessionId::new_v4(),
            quiz,
            states,
            next_token: RequestToken::first(),
            gate: CompletionGate::new(),
            started_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn gate(&self) -> &CompletionGate {
        &self.gate
    }

    #[must_use]
    pub fn state(&self, id: &QuestionId) -> Option<&QuestionState> {
        self.quiz.position(id).map(|index| &self.states[index])
    }

    /// Questions paired with their state, in quiz order.
    pub fn entries(&self) -> impl Iterator<Item = (&Question, &QuestionState)> {
        self.quiz.questions().iter().zip(self.states.iter())
    }

    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.states.iter().all(QuestionState::is_answered)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.states.len(),
            answered: self.states.iter().filter(|state| state.is_answered()).count(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gate.is_unlocked()
    }

    /// Emit the code payload for the follow-on action.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Locked` until every question is correct.
    pub fn proceed(&self) -> Result<ImplementRequest, GateError> {
        self.gate.proceed(self.id, self.quiz.code())
    }

    pub(crate) fn question_and_state_mut(
        &mut self,
        id: &QuestionId,
    ) -> Option<(&Question, &mut QuestionState)> {
        let index = self.quiz.position(id)?;
        Some((&self.quiz.questions()[index], &mut self.states[index]))
    }

    pub(crate) fn issue_token(&mut self) -> RequestToken {
        let token = self.next_token;
        self.next_token = token.next();
        token
    }

    pub(crate) fn gate_mut(&mut self) -> &mut CompletionGate {
        &mut self.gate
    }
}
