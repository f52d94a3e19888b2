//! JSON wire form of the messages exchanged with a host surface.
//!
//! Messages are tagged by `type` with camelCase names, e.g.
//! `{"type":"checkSimilarity","questionId":"q2","userAnswer":"..."}`.

use serde::{Deserialize, Serialize};

use crate::model::{Answer, QuestionId};
use crate::panel::{Effect, PanelEvent};

/// Host → panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostMessage {
    Prompt {
        value: String,
    },
    CheckSimilarity {
        question_id: QuestionId,
        user_answer: String,
        /// Accepted for compatibility; the stored reference answer is used.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_answer: Option<String>,
    },
    SubmitChoice {
        question_id: QuestionId,
        index: usize,
    },
    RevealHint {
        question_id: QuestionId,
    },
    Implement,
}

impl HostMessage {
    #[must_use]
    pub fn into_event(self) -> PanelEvent {
        match self {
            HostMessage::Prompt { value } => PanelEvent::Prompt(value),
            HostMessage::CheckSimilarity {
                question_id,
                user_answer,
                ..
            } => PanelEvent::SubmitAnswer {
                question_id,
                answer: Answer::Text(user_answer),
            },
            HostMessage::SubmitChoice { question_id, index } => PanelEvent::SubmitAnswer {
                question_id,
                answer: Answer::Choice(index),
            },
            HostMessage::RevealHint { question_id } => PanelEvent::RevealHint(question_id),
            HostMessage::Implement => PanelEvent::Implement,
        }
    }
}

/// Panel → host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PanelMessage {
    Response {
        value: String,
    },
    SimilarityResult {
        question_id: QuestionId,
        is_correct: bool,
    },
    Graded {
        question_id: QuestionId,
        is_correct: bool,
        attempts: u32,
        hint_visible: bool,
        /// Set on the grading that completed the quiz.
        unlocked: bool,
    },
    Hint {
        question_id: QuestionId,
        explanation: String,
    },
    Rejected {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<QuestionId>,
        reason: String,
    },
    Implement {
        value: String,
    },
}

impl PanelMessage {
    /// Host-visible form of an effect. Requests to collaborators stay internal.
    #[must_use]
    pub fn from_effect(effect: &Effect) -> Option<Self> {
        let message = match effect {
            Effect::RequestGeneration { .. } | Effect::RequestJudgment(_) => return None,
            Effect::Response(view) => PanelMessage::Response {
                value: view.value().to_string(),
            },
            Effect::SimilarityResult {
                question_id,
                is_correct,
            } => PanelMessage::SimilarityResult {
                question_id: question_id.clone(),
                is_correct: *is_correct,
            },
            Effect::Graded(report) => PanelMessage::Graded {
                question_id: report.question_id.clone(),
                is_correct: report.verdict.is_correct(),
                attempts: report.attempts,
                hint_visible: report.hint_visible,
                unlocked: report.completion.is_some(),
            },
            Effect::Hint {
                question_id,
                explanation,
            } => PanelMessage::Hint {
                question_id: question_id.clone(),
                explanation: explanation.clone(),
            },
            Effect::Rejected {
                question_id,
                reason,
            } => PanelMessage::Rejected {
                question_id: question_id.clone(),
                reason: reason.to_string(),
            },
            Effect::Implement(request) => PanelMessage::Implement {
                value: request.code.source().to_string(),
            },
        };
        Some(message)
    }
}
