//! Decoding of the generator's structured reply.
//!
//! The generator is asked for a JSON document holding the code and its
//! questions. Anything that does not decode into a fully valid quiz is shown
//! as plain text instead; a partially populated quiz is never produced.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{CodeBlock, Question, QuestionError, QuestionId, Quiz, QuizError};

const MULTIPLE_CHOICE: &str = "multiple-choice";
const FREE_RESPONSE: &str = "free-response";

/// How the panel should render a generator reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Quiz(Quiz),
    /// Raw reply, shown verbatim.
    Text(String),
}

/// Why a reply was not accepted as a quiz.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParseRejection {
    #[error("reply is not a quiz document: {0}")]
    Json(String),
    #[error("reply has no questions")]
    NoQuestions,
    #[error("question {index} has unknown type {kind:?}")]
    UnknownKind { index: usize, kind: String },
    #[error("question {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    #[serde(default)]
    code: String,
    #[serde(default)]
    questions: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    text: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer_index: Option<usize>,
    #[serde(default)]
    reference_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl RawQuestion {
    fn into_question(self, index: usize) -> Result<Question, ParseRejection> {
        let id = QuestionId::new(self.id);
        let explanation = self.explanation.unwrap_or_default();

        match self.kind.trim() {
            MULTIPLE_CHOICE => {
                let options = self.options.ok_or(ParseRejection::MissingField {
                    index,
                    field: "options",
                })?;
                let correct = self
                    .correct_answer_index
                    .ok_or(ParseRejection::MissingField {
                        index,
                        field: "correct_answer_index",
                    })?;
                Ok(Question::multiple_choice(
                    id,
                    self.text,
                    options,
                    correct,
                    explanation,
                )?)
            }
            FREE_RESPONSE => {
                let reference = self.reference_answer.ok_or(ParseRejection::MissingField {
                    index,
                    field: "reference_answer",
                })?;
                Ok(Question::free_response(
                    id,
                    self.text,
                    reference,
                    explanation,
                )?)
            }
            other => Err(ParseRejection::UnknownKind {
                index,
                kind: other.to_string(),
            }),
        }
    }
}

/// Decode a reply into a validated quiz.
///
/// # Errors
///
/// Returns the first `ParseRejection` encountered; no partial quiz is kept.
pub fn decode_quiz(raw: &str) -> Result<Quiz, ParseRejection> {
    let body = strip_json_fence(raw);
    let document: RawQuiz =
        serde_json::from_str(body).map_err(|err| ParseRejection::Json(err.to_string()))?;

    let raw_questions = document
        .questions
        .filter(|questions| !questions.is_empty())
        .ok_or(ParseRejection::NoQuestions)?;

    let questions = raw_questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| question.into_question(index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz::new(CodeBlock::parse(&document.code), questions)?)
}

/// Classify a generator reply. Never fails: rejected replies become `Text`.
#[must_use]
pub fn parse_response(raw: &str) -> ParsedResponse {
    match decode_quiz(raw) {
        Ok(quiz) => ParsedResponse::Quiz(quiz),
        Err(reason) => {
            tracing::debug!(%reason, "reply shown as text");
            ParsedResponse::Text(raw.to_string())
        }
    }
}

/// Strip a single ```` ```json ```` fence wrapping the whole reply.
fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    let (tag, body) = inner.split_once('\n').unwrap_or(("", inner));
    let tag = tag.trim();
    if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
        body.trim()
    } else {
        trimmed
    }
}
