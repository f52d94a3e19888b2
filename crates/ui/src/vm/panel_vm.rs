use vibely_core::model::{Feedback, Question, QuestionId, QuestionKind, QuestionState};
use vibely_core::panel::{Panel, PanelView};
use vibely_core::session::QuizSession;

use vibely_core::time::format_elapsed;

pub const CORRECT_TEXT: &str = "✅ Correct!";
pub const INCORRECT_TEXT: &str = "❌ Incorrect. Try again.";
pub const CHECKING_TEXT: &str = "⏳ Checking your answer…";
pub const NO_HINT_TEXT: &str = "No hint available";
pub const PROCEED_TEXT: &str = "🎉 Congrats! Want to implement this code?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTone {
    Neutral,
    Success,
    Failure,
    Hint,
}

impl FeedbackTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            FeedbackTone::Neutral => "feedback",
            FeedbackTone::Success => "feedback feedback-correct",
            FeedbackTone::Failure => "feedback feedback-incorrect",
            FeedbackTone::Hint => "feedback feedback-hint",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInputVm {
    Choice { options: Vec<String> },
    Free,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// Stable per quiz, so a new quiz never reuses a card's local input state.
    pub key: String,
    pub id: QuestionId,
    pub label: String,
    pub text: String,
    pub input: AnswerInputVm,
    pub feedback: Option<(FeedbackTone, String)>,
    pub can_submit: bool,
    pub show_hint_button: bool,
    pub answered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub language: Option<String>,
    pub code: String,
    pub questions: Vec<QuestionVm>,
    pub progress_label: String,
    pub complete: bool,
    /// Set once the quiz is unlocked, e.g. `"Completed in 2m 05s"`.
    pub completed_in: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelBodyVm {
    Idle,
    Working,
    Quiz(QuizVm),
    /// A reply that was not a quiz, shown verbatim.
    Text(String),
    Failed(String),
}

#[must_use]
pub fn map_panel(panel: &Panel) -> PanelBodyVm {
    match panel.view() {
        PanelView::Idle => PanelBodyVm::Idle,
        PanelView::Working { .. } => PanelBodyVm::Working,
        PanelView::Quiz(session) => PanelBodyVm::Quiz(map_quiz(session)),
        PanelView::Text(text) => PanelBodyVm::Text(text.clone()),
        PanelView::Failed(message) => PanelBodyVm::Failed(message.clone()),
    }
}

#[must_use]
pub fn map_quiz(session: &QuizSession) -> QuizVm {
    let questions = session
        .entries()
        .enumerate()
        .map(|(index, (question, state))| map_question(session, index, question, state))
        .collect();
    let progress = session.progress();
    let code = session.quiz().code();
    let completed_in = session
        .gate()
        .unlocked_at()
        .map(|at| format!("Completed in {}", format_elapsed(session.started_at(), at)));

    QuizVm {
        language: code.language().map(str::to_string),
        code: code.source().to_string(),
        questions,
        progress_label: format!("{}/{} correct", progress.answered, progress.total),
        complete: session.is_complete(),
        completed_in,
    }
}

fn map_question(
    session: &QuizSession,
    index: usize,
    question: &Question,
    state: &QuestionState,
) -> QuestionVm {
    let input = match question.kind() {
        QuestionKind::MultipleChoice { options, .. } => AnswerInputVm::Choice {
            options: options.clone(),
        },
        QuestionKind::FreeResponse { .. } => AnswerInputVm::Free,
    };

    QuestionVm {
        key: format!("{}-{}", session.id(), question.id()),
        id: question.id().clone(),
        label: format!("Q{}:", index + 1),
        text: question.text().to_string(),
        input,
        feedback: feedback_line(state.feedback(), question.explanation()),
        can_submit: state.accepts_submission(),
        show_hint_button: state.hint_visible(),
        answered: state.is_answered(),
    }
}

/// Feedback line shown under a question.
#[must_use]
pub fn feedback_line(feedback: Feedback, explanation: &str) -> Option<(FeedbackTone, String)> {
    match feedback {
        Feedback::None => None,
        Feedback::Checking => Some((FeedbackTone::Neutral, CHECKING_TEXT.to_string())),
        Feedback::Correct => Some((FeedbackTone::Success, CORRECT_TEXT.to_string())),
        Feedback::Incorrect => Some((FeedbackTone::Failure, INCORRECT_TEXT.to_string())),
        Feedback::Hint => {
            let hint = if explanation.trim().is_empty() {
                NO_HINT_TEXT
            } else {
                explanation
            };
            Some((FeedbackTone::Hint, format!("💡 Hint: {hint}")))
        }
    }
}
