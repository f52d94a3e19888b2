use crate::model::ids::RequestToken;

/// Incorrect attempts after which the hint affordance is shown.
pub const HINT_THRESHOLD: u32 = 3;

/// What the user submitted for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index of the selected multiple-choice option.
    Choice(usize),
    /// Free-response text.
    Text(String),
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Where a question sits in its grading cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    Unanswered,
    Checking,
    /// Last attempt was wrong; the question accepts another submission.
    Incorrect,
    /// Terminal.
    Correct,
}

/// Feedback line currently shown under a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Checking,
    Correct,
    Incorrect,
    Hint,
}

/// Mutable grading state of a single question.
///
/// Only the grading engine mutates it. `answered` never reverts once set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionState {
    attempts: u32,
    answered: bool,
    last_selection: Option<Answer>,
    hint_visible: bool,
    pending: Option<RequestToken>,
    feedback: Feedback,
}

impl QuestionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn last_selection(&self) -> Option<&Answer> {
        self.last_selection.as_ref()
    }

    #[must_use]
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Token of the judgment currently awaited, if any.
    #[must_use]
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn phase(&self) -> QuestionPhase {
        if self.answered {
            QuestionPhase::Correct
        } else if self.pending.is_some() {
            QuestionPhase::Checking
        } else if self.attempts > 0 {
            QuestionPhase::Incorrect
        } else {
            QuestionPhase::Unanswered
        }
    }

    /// Whether a new submission is accepted right now.
    #[must_use]
    pub fn accepts_submission(&self) -> bool {
        !self.answered && self.pending.is_none()
    }

    pub(crate) fn begin_check(&mut self, answer: Answer, token: RequestToken) {
        self.last_selection = Some(answer);
        self.pending = Some(token);
        self.feedback = Feedback::Checking;
    }

    pub(crate) fn select(&mut self, answer: Answer) {
        self.last_selection = Some(answer);
    }

    /// Take the outstanding token if it matches `token`.
    pub(crate) fn settle(&mut self, token: RequestToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn record(&mut self, verdict: Verdict) {
        self.attempts = self.attempts.saturating_add(1);
        match verdict {
            Verdict::Correct => {
                self.answered = true;
                self.feedback = Feedback::Correct;
            }
            Verdict::Incorrect => {
                self.feedback = Feedback::Incorrect;
                if self.attempts >= HINT_THRESHOLD {
                    self.hint_visible = true;
                }
            }
        }
    }

    pub(crate) fn show_hint(&mut self) {
        self.feedback = Feedback::Hint;
    }
}
