use thiserror::Error;

use crate::model::ids::QuestionId;

/// Fewest options a multiple-choice question may offer.
pub const MIN_OPTIONS: usize = 3;
/// Most options a multiple-choice question may offer.
pub const MAX_OPTIONS: usize = 5;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id is empty")]
    EmptyId,

    #[error("question {id} has no text")]
    EmptyText { id: QuestionId },

    #[error("question {id} has {count} options, expected 3 to 5")]
    OptionCount { id: QuestionId, count: usize },

    #[error("question {id} has an empty option at index {index}")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id} marks option {index} correct but only has {len} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("question {id} has no reference answer")]
    EmptyReference { id: QuestionId },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Kind-specific payload of a question.
///
/// Each variant carries exactly the fields its kind needs, so grading never has
/// to check for missing options or a missing reference answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_index: usize,
    },
    FreeResponse {
        reference_answer: String,
    },
}

/// One comprehension question about the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    explanation: String,
    kind: QuestionKind,
}

impl Question {
    /// Build a validated multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id or text is blank, the option count is
    /// outside `MIN_OPTIONS..=MAX_OPTIONS`, an option is blank, or `correct_index`
    /// does not point at an option.
    pub fn multiple_choice(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = validate_header(&id, text.into())?;

        let count = options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(QuestionError::OptionCount { id, count });
        }
        if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id, index });
        }
        if correct_index >= count {
            return Err(QuestionError::CorrectIndexOutOfRange {
                id,
                index: correct_index,
                len: count,
            });
        }

        Ok(Self {
            id,
            text,
            explanation: explanation.into().trim().to_string(),
            kind: QuestionKind::MultipleChoice {
                options,
                correct_index,
            },
        })
    }

    /// Build a validated free-response question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id, text, or reference answer is blank.
    pub fn free_response(
        id: QuestionId,
        text: impl Into<String>,
        reference_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = validate_header(&id, text.into())?;
        let reference_answer = reference_answer.into().trim().to_string();
        if reference_answer.is_empty() {
            return Err(QuestionError::EmptyReference { id });
        }

        Ok(Self {
            id,
            text,
            explanation: explanation.into().trim().to_string(),
            kind: QuestionKind::FreeResponse { reference_answer },
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Explanation shown as the hint. May be empty.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice { .. })
    }

    /// Options of a multiple-choice question; empty for free-response.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => options,
            QuestionKind::FreeResponse { .. } => &[],
        }
    }
}

fn validate_header(id: &QuestionId, text: String) -> Result<String, QuestionError> {
    if id.is_blank() {
        return Err(QuestionError::EmptyId);
    }
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(QuestionError::EmptyText { id: id.clone() });
    }
    Ok(text)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
