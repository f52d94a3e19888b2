//! Instructions sent to the chat model.

use vibely_core::judgment::JudgeRequest;

/// System prompt for quiz generation. Describes the JSON document the parser
/// accepts.
pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are a coding assistant inside an editor panel. For the user's request, reply with a single JSON object with two keys:

"code": the requested code as a Markdown code block, opened with triple backticks and a language tag (for example ```python or ```js). The code must be self-contained and cleanly indented.

"questions": an array of 3 to 5 comprehension questions about that code. Every question has:
  - "id": a unique string such as "q1", "q2"
  - "type": "multiple-choice" or "free-response"
  - "text": the question
  - "explanation": one or two sentences explaining the answer, used as a hint
Multiple-choice questions also have:
  - "options": an array of 3 to 5 answer choices
  - "correct_answer_index": the 0-based index of the correct option
Free-response questions also have:
  - "reference_answer": a short model answer

Reply with the JSON object only. No commentary and no Markdown around the JSON."#;

/// System prompt for free-response grading.
pub const JUDGE_SYSTEM_PROMPT: &str = "You grade answers to questions about code. Compare the student's answer with the reference answer. If they mean the same thing, reply with exactly the word correct. Otherwise reply with exactly the word incorrect. Reply with that single word and nothing else.";

/// Replies to a grading request are a single word.
pub const JUDGE_MAX_TOKENS: u32 = 5;

#[must_use]
pub fn judge_user_message(request: &JudgeRequest) -> String {
    format!(
        "Question: {}\nReference answer: {}\nStudent answer: {}",
        request.question_text, request.reference_answer, request.user_answer
    )
}
