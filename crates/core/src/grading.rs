//! Grading engine.
//!
//! Each question runs `unanswered → checking → correct` or
//! `unanswered → checking → incorrect → unanswered`. Multiple-choice answers are
//! checked locally; free-response answers are handed out as a [`JudgeRequest`]
//! and settled later by [`resolve_judgment`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::CollaboratorFailure;
use crate::gate::CompletionUnlocked;
use crate::judgment::{JudgeRequest, verdict_from_outcome};
use crate::model::{Answer, QuestionId, QuestionKind, RequestToken, Verdict};
use crate::session::QuizSession;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradingError {
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),
    #[error("question {0} is already answered")]
    AlreadyAnswered(QuestionId),
    #[error("question {0} is still being checked")]
    JudgmentPending(QuestionId),
    #[error("answer does not match the kind of question {0}")]
    AnswerMismatch(QuestionId),
    #[error("answer for question {0} is empty")]
    EmptyAnswer(QuestionId),
    #[error("question {id} has no option {index} (it has {len})")]
    ChoiceOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
    #[error("hint for question {0} is not available yet")]
    HintLocked(QuestionId),
}

/// Result of one grading transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub question_id: QuestionId,
    pub verdict: Verdict,
    pub attempts: u32,
    pub hint_visible: bool,
    /// Present only on the transition that completed the quiz.
    pub completion: Option<CompletionUnlocked>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Graded locally.
    Graded(GradeReport),
    /// Waiting on the grading collaborator.
    NeedsJudgment(JudgeRequest),
}

/// Submit an answer for a question.
///
/// # Errors
///
/// Returns `GradingError` when the question is unknown, already answered, still
/// awaiting a judgment, or when the answer does not fit the question. Rejected
/// submissions leave the attempt counter untouched.
pub fn submit(
    session: &mut QuizSession,
    question_id: &QuestionId,
    answer: Answer,
    now: DateTime<Utc>,
) -> Result<SubmitOutcome, GradingError> {
    let session_id = session.id();
    let (question, state) = session
        .question_and_state_mut(question_id)
        .ok_or_else(|| GradingError::UnknownQuestion(question_id.clone()))?;

    if state.is_answered() {
        return Err(GradingError::AlreadyAnswered(question_id.clone()));
    }
    if state.pending().is_some() {
        return Err(GradingError::JudgmentPending(question_id.clone()));
    }

    let question_text = question.text().to_string();
    match (question.kind().clone(), answer) {
        (
            QuestionKind::MultipleChoice {
                options,
                correct_index,
            },
            Answer::Choice(index),
        ) => {
            if index >= options.len() {
                return Err(GradingError::ChoiceOutOfRange {
                    id: question_id.clone(),
                    index,
                    len: options.len(),
                });
            }
            let verdict = if index == correct_index {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            };
            state.select(Answer::Choice(index));
            state.record(verdict);
            Ok(SubmitOutcome::Graded(finish(session, question_id, verdict, now)))
        }
        (QuestionKind::FreeResponse { reference_answer }, Answer::Text(text)) => {
            if text.trim().is_empty() {
                return Err(GradingError::EmptyAnswer(question_id.clone()));
            }
            let token = session.issue_token();
            let Some((_, state)) = session.question_and_state_mut(question_id) else {
                return Err(GradingError::UnknownQuestion(question_id.clone()));
            };
            state.begin_check(Answer::Text(text.clone()), token);

            Ok(SubmitOutcome::NeedsJudgment(JudgeRequest {
                session_id,
                question_id: question_id.clone(),
                token,
                question_text,
                reference_answer,
                user_answer: text,
            }))
        }
        _ => Err(GradingError::AnswerMismatch(question_id.clone())),
    }
}

/// Settle a free-response judgment.
///
/// Returns `Ok(None)` when `token` is not the question's outstanding request:
/// the result belongs to a superseded submission and is dropped. Collaborator
/// failures and any reply other than `correct` grade as incorrect.
///
/// # Errors
///
/// Returns `GradingError::UnknownQuestion` for ids outside the quiz.
pub fn resolve_judgment(
    session: &mut QuizSession,
    question_id: &QuestionId,
    token: RequestToken,
    outcome: &Result<String, CollaboratorFailure>,
    now: DateTime<Utc>,
) -> Result<Option<GradeReport>, GradingError> {
    let (_, state) = session
        .question_and_state_mut(question_id)
        .ok_or_else(|| GradingError::UnknownQuestion(question_id.clone()))?;

    if !state.settle(token) {
        tracing::debug!(question = %question_id, token = %token, "dropping stale judgment");
        return Ok(None);
    }

    if let Err(failure) = outcome {
        tracing::warn!(
            question = %question_id,
            error = %failure,
            "judgment failed, grading as incorrect"
        );
    }
    let verdict = verdict_from_outcome(outcome);
    state.record(verdict);
    Ok(Some(finish(session, question_id, verdict, now)))
}

/// Show the stored explanation for a question.
///
/// Does not change attempts or correctness.
///
/// # Errors
///
/// Returns `GradingError::UnknownQuestion` for ids outside the quiz and
/// `GradingError::HintLocked` before the hint affordance is visible.
pub fn reveal_hint(
    session: &mut QuizSession,
    question_id: &QuestionId,
) -> Result<String, GradingError> {
    let (question, state) = session
        .question_and_state_mut(question_id)
        .ok_or_else(|| GradingError::UnknownQuestion(question_id.clone()))?;

    if !state.hint_visible() {
        return Err(GradingError::HintLocked(question_id.clone()));
    }
    state.show_hint();
    Ok(question.explanation().to_string())
}

fn finish(
    session: &mut QuizSession,
    question_id: &QuestionId,
    verdict: Verdict,
    now: DateTime<Utc>,
) -> GradeReport {
    let (attempts, hint_visible) = session
        .state(question_id)
        .map_or((0, false), |state| (state.attempts(), state.hint_visible()));
    let all_correct = session.all_correct();
    let session_id = session.id();
    let completion = session.gate_mut().observe(session_id, all_correct, now);

    GradeReport {
        question_id: question_id.clone(),
        verdict,
        attempts,
        hint_visible,
        completion,
    }
}
