//! Model-assisted judgment of free-response answers.

use crate::error::CollaboratorFailure;
use crate::model::{QuestionId, RequestToken, SessionId, Verdict};

/// Outbound request asking the grading collaborator to compare two answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRequest {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub token: RequestToken,
    pub question_text: String,
    pub reference_answer: String,
    pub user_answer: String,
}

/// Map the collaborator's reply to a verdict.
///
/// Only the literal token `correct` (trimmed, any case) is accepted as correct.
/// Everything else, including `incorrect`, chatter, or an empty reply, is incorrect.
#[must_use]
pub fn verdict_from_reply(reply: &str) -> Verdict {
    if reply.trim().eq_ignore_ascii_case("correct") {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Collapse a judgment round trip into a verdict. Failures are incorrect.
#[must_use]
pub fn verdict_from_outcome(outcome: &Result<String, CollaboratorFailure>) -> Verdict {
    match outcome {
        Ok(reply) => verdict_from_reply(reply),
        Err(_) => Verdict::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_correct_token_passes() {
        assert_eq!(verdict_from_reply("correct"), Verdict::Correct);
        assert_eq!(verdict_from_reply("  CoRrEcT \n"), Verdict::Correct);

        for reply in [
            "incorrect",
            "Incorrect",
            "",
            "correct.",
            "Correct!",
            "The answer is correct",
            "yes",
            "correct correct",
        ] {
            assert_eq!(verdict_from_reply(reply), Verdict::Incorrect, "{reply:?}");
        }
    }

    #[test]
    fn failures_are_incorrect() {
        let failed = Err(CollaboratorFailure::new("connection reset"));
        assert_eq!(verdict_from_outcome(&failed), Verdict::Incorrect);
        assert_eq!(verdict_from_outcome(&Ok("correct".into())), Verdict::Correct);
    }
}
